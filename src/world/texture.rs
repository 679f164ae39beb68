// Flat images the projector's coordinates are looked up in.
// Coordinates are normalised: (1.0, 1.0) is one full texture away from the
// origin, so the ground repeats every unit of camera travel.

use std::path::Path;

use glam::Vec2;

use crate::renderer::Rgba;

/// How a coordinate outside `[0, 1)` is resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrap {
    /// Tile the texture endlessly (GPU `repeat` sampler).
    #[default]
    Repeat,
    /// Nothing outside the unit square (console sprite sampling).
    Blank,
}

/// Things that can go wrong when building a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Decoder failure (missing file, unsupported format, …).
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// A texture needs at least one texel.
    #[error("texture must not be empty ({w}x{h})")]
    Empty { w: usize, h: usize },

    /// `pixels.len()` disagrees with `w * h`.
    #[error("pixel buffer holds {len} texels, expected {w}x{h}")]
    SizeMismatch { w: usize, h: usize, len: usize },
}

/// CPU-side storage: 0x00RRGGBB in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    w: usize,
    h: usize,
    pixels: Vec<Rgba>,
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        Self::checker(8, 8, 1, 0x00_C0C0C0, 0x00_404040)
    }
}

impl Texture {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    pub fn from_pixels(w: usize, h: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if w == 0 || h == 0 {
            return Err(TextureError::Empty { w, h });
        }
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                w,
                h,
                len: pixels.len(),
            });
        }
        Ok(Self { w, h, pixels })
    }

    /// Decode any PNG / JPEG / BMP file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgb8();
        let (w, h) = (img.width() as usize, img.height() as usize);
        let pixels = img
            .pixels()
            .map(|p| (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
            .collect();
        tracing::debug!(path = %path.display(), w, h, "texture loaded");
        Self::from_pixels(w, h, pixels)
    }

    /// Two-colour checkerboard with square tiles of `tile` texels.
    pub fn checker(w: usize, h: usize, tile: usize, a: Rgba, b: Rgba) -> Self {
        let tile = tile.max(1);
        let (w, h) = (w.max(1), h.max(1));
        let pixels = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w / tile, i / w / tile);
                if (x ^ y) & 1 == 0 { a } else { b }
            })
            .collect();
        Self { w, h, pixels }
    }

    /// Vertical blend from `top` (row 0) to `bottom` (last row).
    pub fn sky_gradient(w: usize, h: usize, top: Rgba, bottom: Rgba) -> Self {
        let (w, h) = (w.max(1), h.max(1));
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            let t = if h == 1 { 0.0 } else { y as f32 / (h - 1) as f32 };
            pixels.extend(std::iter::repeat_n(lerp_rgb(top, bottom, t), w));
        }
        Self { w, h, pixels }
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.w + x]
    }

    /// Unfiltered lookup of a normalised coordinate.
    pub fn sample_nearest(&self, uv: Vec2, wrap: Wrap) -> Option<Rgba> {
        let (x, y) = match wrap {
            Wrap::Repeat => (
                (uv.x * self.w as f32).floor() as i64,
                (uv.y * self.h as f32).floor() as i64,
            ),
            Wrap::Blank => {
                if !(0.0..1.0).contains(&uv.x) || !(0.0..1.0).contains(&uv.y) {
                    return None;
                }
                // round-to-nearest keeps `u * w` below `w` for any u < 1.0
                return Some(self.texel(
                    (uv.x * self.w as f32) as usize,
                    (uv.y * self.h as f32) as usize,
                ));
            }
        };
        let x = x.rem_euclid(self.w as i64) as usize;
        let y = y.rem_euclid(self.h as i64) as usize;
        Some(self.texel(x, y))
    }

    /// Bilinear-filtered lookup with repeat addressing, texel centres at
    /// half-integers like a GPU sampler.
    pub fn sample_bilinear(&self, uv: Vec2) -> Rgba {
        let fx = uv.x * self.w as f32 - 0.5;
        let fy = uv.y * self.h as f32 - 0.5;
        let (x0, y0) = (fx.floor(), fy.floor());
        let (tx, ty) = (fx - x0, fy - y0);

        let wrap = |v: f32, n: usize| (v as i64).rem_euclid(n as i64) as usize;
        let (xa, xb) = (wrap(x0, self.w), wrap(x0 + 1.0, self.w));
        let (ya, yb) = (wrap(y0, self.h), wrap(y0 + 1.0, self.h));

        let top = lerp_rgb(self.texel(xa, ya), self.texel(xb, ya), tx);
        let bot = lerp_rgb(self.texel(xa, yb), self.texel(xb, yb), tx);
        lerp_rgb(top, bot, ty)
    }
}

/// Per-channel linear blend of two 0x00RRGGBB colours.
pub fn lerp_rgb(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let ch = |shift: u32| {
        let ca = ((a >> shift) & 0xFF) as f32;
        let cb = ((b >> shift) & 0xFF) as f32;
        ((ca + (cb - ca) * t).round().clamp(0.0, 255.0) as u32) << shift
    };
    ch(16) | ch(8) | ch(0)
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    fn quad() -> Texture {
        // 2×2: red green / blue white
        Texture::from_pixels(2, 2, vec![0xFF0000, 0x00FF00, 0x0000FF, 0xFFFFFF]).unwrap()
    }

    #[test]
    fn nearest_repeat_tiles() {
        let tex = quad();
        assert_eq!(tex.sample_nearest(vec2(0.1, 0.1), Wrap::Repeat), Some(0xFF0000));
        assert_eq!(tex.sample_nearest(vec2(1.6, 0.1), Wrap::Repeat), Some(0x00FF00));
        assert_eq!(tex.sample_nearest(vec2(-0.4, -0.4), Wrap::Repeat), Some(0xFFFFFF));
        // large camera-space coordinates still resolve
        assert_eq!(tex.sample_nearest(vec2(1000.25, 1000.75), Wrap::Repeat), Some(0x0000FF));
    }

    #[test]
    fn nearest_blank_outside_unit_square() {
        let tex = quad();
        assert_eq!(tex.sample_nearest(vec2(0.75, 0.75), Wrap::Blank), Some(0xFFFFFF));
        assert_eq!(tex.sample_nearest(vec2(1.0, 0.5), Wrap::Blank), None);
        assert_eq!(tex.sample_nearest(vec2(0.5, -0.01), Wrap::Blank), None);
    }

    #[test]
    fn nearest_blank_just_below_one_keeps_last_texel() {
        let edge = f32::from_bits(1.0_f32.to_bits() - 1); // 0.99999994
        for w in [1, 2, 3, 5, 7, 1000, 1024, 4095] {
            let tex = Texture::from_pixels(w, 1, (0..w as u32).collect()).unwrap();
            assert_eq!(
                tex.sample_nearest(vec2(edge, 0.0), Wrap::Blank),
                Some(w as u32 - 1),
                "width {w}"
            );
        }
    }

    #[test]
    fn bilinear_hits_texel_centres_and_blends_between() {
        let tex = quad();
        assert_eq!(tex.sample_bilinear(vec2(0.25, 0.25)), 0xFF0000);
        assert_eq!(tex.sample_bilinear(vec2(0.75, 0.75)), 0xFFFFFF);
        // halfway between red and green
        assert_eq!(tex.sample_bilinear(vec2(0.5, 0.25)), 0x808000);
    }

    #[test]
    fn size_checks() {
        assert!(matches!(
            Texture::from_pixels(0, 4, vec![]),
            Err(TextureError::Empty { w: 0, h: 4 })
        ));
        assert!(matches!(
            Texture::from_pixels(2, 2, vec![0; 3]),
            Err(TextureError::SizeMismatch { len: 3, .. })
        ));
    }

    #[test]
    fn procedural_textures() {
        let chk = Texture::checker(4, 4, 2, 1, 2);
        assert_eq!(chk.texel(0, 0), 1);
        assert_eq!(chk.texel(2, 0), 2);
        assert_eq!(chk.texel(2, 2), 1);

        let sky = Texture::sky_gradient(1, 3, 0x000000, 0xFEFEFE);
        assert_eq!(sky.texel(0, 0), 0x000000);
        assert_eq!(sky.texel(0, 1), 0x7F7F7F);
        assert_eq!(sky.texel(0, 2), 0xFEFEFE);
    }
}
