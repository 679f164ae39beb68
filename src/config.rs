//! View configuration, validated once before the first frame.

use std::{f32::consts::FRAC_PI_4, path::PathBuf};

use glam::{Vec2, vec2};

use crate::{
    engine::{Screen, ScreenError},
    world::{Camera, CameraError, Texture, TextureError},
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid screen: {0}")]
    Screen(#[from] ScreenError),

    #[error("invalid camera: {0}")]
    Camera(#[from] CameraError),
}

/// Raw camera parameters as they come from the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraParams {
    pub pos: Vec2,
    pub heading: f32,
    pub fov_left: f32,
    pub fov_right: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            pos: vec2(1000.0, 1000.0),
            heading: 0.1,
            fov_left: -FRAC_PI_4,
            fov_right: FRAC_PI_4,
            near: 0.005,
            far: 0.03,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub width: usize,
    pub height: usize,
    pub camera: CameraParams,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            camera: CameraParams::default(),
        }
    }
}

impl ViewConfig {
    pub fn build(&self) -> Result<(Screen, Camera), ConfigError> {
        let screen = Screen::new(self.width, self.height)?;
        let c = &self.camera;
        let camera = Camera::new(c.pos, c.heading, c.fov_left, c.fov_right, c.near, c.far)?;
        tracing::debug!(
            width = screen.w,
            height = screen.h,
            half_h = screen.half_h,
            ?camera,
            "view configured"
        );
        Ok((screen, camera))
    }
}

/// Command-line options shared by the viewers (`#[command(flatten)]`).
#[derive(clap::Args, Debug, Clone)]
pub struct ViewArgs {
    /// Ground image (PNG / JPEG / BMP); procedural checkerboard if omitted
    #[arg(long, value_name = "FILE")]
    pub ground: Option<PathBuf>,

    /// Sky image; procedural gradient if omitted
    #[arg(long, value_name = "FILE")]
    pub sky: Option<PathBuf>,

    #[arg(long, default_value_t = 480)]
    pub width: usize,

    #[arg(long, default_value_t = 320)]
    pub height: usize,

    /// Camera X in texture units
    #[arg(long, default_value_t = 1000.0, allow_hyphen_values = true)]
    pub x: f32,

    /// Camera Y in texture units
    #[arg(long, default_value_t = 1000.0, allow_hyphen_values = true)]
    pub y: f32,

    /// Heading in radians (0 = +X, counter-clockwise)
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    pub heading: f32,

    /// Half field of view in radians; edges sit at heading ± fov
    #[arg(long, default_value_t = FRAC_PI_4)]
    pub fov: f32,

    #[arg(long, default_value_t = 0.005)]
    pub near: f32,

    #[arg(long, default_value_t = 0.03)]
    pub far: f32,
}

impl ViewArgs {
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            width: self.width,
            height: self.height,
            camera: CameraParams {
                pos: vec2(self.x, self.y),
                heading: self.heading,
                fov_left: -self.fov,
                fov_right: self.fov,
                near: self.near,
                far: self.far,
            },
        }
    }

    /// Load the `(ground, sky)` pair, falling back to procedural textures.
    pub fn textures(&self) -> Result<(Texture, Texture), TextureError> {
        let ground = match &self.ground {
            Some(path) => Texture::from_file(path)?,
            None => Texture::checker(256, 256, 32, 0x00_3C9A3C, 0x00_2A6E2A),
        };
        let sky = match &self.sky {
            Some(path) => Texture::from_file(path)?,
            None => Texture::sky_gradient(1, 256, 0x00_0A1A4A, 0x00_8EC8F0),
        };
        Ok((ground, sky))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_reference_view() {
        let (screen, camera) = ViewConfig::default().build().unwrap();
        assert_eq!((screen.w, screen.half_h), (480, 160));
        assert_eq!(camera.pos(), vec2(1000.0, 1000.0));
        assert_eq!((camera.near(), camera.far()), (0.005, 0.03));
    }

    #[test]
    fn errors_surface_from_either_part() {
        let mut cfg = ViewConfig {
            height: 1,
            ..ViewConfig::default()
        };
        assert_eq!(
            cfg.build().unwrap_err(),
            ConfigError::Screen(ScreenError::ZeroHalfHeight(1))
        );

        cfg.height = 320;
        cfg.camera.far = 0.001;
        assert!(matches!(
            cfg.build().unwrap_err(),
            ConfigError::Camera(CameraError::FarNotBeyondNear { .. })
        ));
    }

    #[derive(clap::Parser)]
    struct Cli {
        #[command(flatten)]
        view: ViewArgs,
    }

    #[test]
    fn cli_defaults_match_view_config_default() {
        use clap::Parser;
        let cli = Cli::parse_from(["test"]);
        assert_eq!(cli.view.view_config(), ViewConfig::default());

        let cli = Cli::parse_from(["test", "--fov", "0.5", "--heading", "-1.0"]);
        let cfg = cli.view.view_config();
        assert_eq!((cfg.camera.fov_left, cfg.camera.fov_right), (-0.5, 0.5));
        assert_eq!(cfg.camera.heading, -1.0);
    }
}
