//! Rendering abstraction layer.
//!
//! *The projector never touches a pixel buffer directly.*
//! A [`Sampler`] turns a texture coordinate into something displayable and a
//! [`Renderer`] owns the surface those appearances are written to.
//!
//! * [`software::Software`] – packed 0x00RRGGBB frame-buffer for a window.
//! * [`terminal::Terminal`] – glyph + colour cells for a text console.
//! * [`fragment`] – per-fragment path that does its own filtered fetch.
//!
//! The blanket [`RendererExt::draw_frame`] is the ground/sky driver shared by
//! every back-end.

use glam::Vec2;

use crate::{
    engine::{Half, Projector},
    world::{Texture, Wrap},
};

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Turns a texture coordinate into a displayable appearance.
///
/// Implementations must be pure; a frame may sample from several threads.
pub trait Sampler {
    type Appearance: Copy;

    fn sample(&self, uv: Vec2) -> Self::Appearance;
}

/// Nearest-texel colour lookup, `background` wherever [`Wrap::Blank`]
/// finds nothing.
#[derive(Clone, Copy, Debug)]
pub struct Nearest<'a> {
    pub texture: &'a Texture,
    pub wrap: Wrap,
    pub background: Rgba,
}

impl<'a> Nearest<'a> {
    pub fn repeat(texture: &'a Texture) -> Self {
        Self {
            texture,
            wrap: Wrap::Repeat,
            background: 0,
        }
    }
}

impl Sampler for Nearest<'_> {
    type Appearance = Rgba;

    #[inline]
    fn sample(&self, uv: Vec2) -> Rgba {
        self.texture
            .sample_nearest(uv, self.wrap)
            .unwrap_or(self.background)
    }
}

/// A renderer that owns an internal scratch surface for the whole frame.
///
/// `end_frame` hands the finished surface to a user-supplied closure.
pub trait Renderer {
    type Appearance: Copy;

    /// (Re)allocate internal scratch for the requested resolution and clear it.
    fn begin_frame(&mut self, width: usize, height: usize);

    /// Write one cell. Out-of-range positions are ignored.
    fn put(&mut self, x: usize, y: usize, appearance: Self::Appearance);

    /// Finish the frame and **loan** the finished surface to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Self::Appearance], usize, usize);
}

/// Convenience blanket-impl with the ground/sky `draw_frame` driver.
pub trait RendererExt: Renderer {
    /// Project every half-screen pixel once and write it twice: `ground` to
    /// the lower half, `sky` mirrored into the upper half.
    ///
    /// Both halves start on the horizon row `half_h`; the sky write comes
    /// second and wins there.
    fn draw_frame<G, S, F>(&mut self, projector: &Projector, ground: &G, sky: &S, submit: F)
    where
        G: Sampler<Appearance = Self::Appearance>,
        S: Sampler<Appearance = Self::Appearance>,
        F: FnOnce(&[Self::Appearance], usize, usize),
    {
        let screen = *projector.screen();
        self.begin_frame(screen.w, screen.h);

        for row in 0..screen.half_h {
            let slice = projector.row_slice(row as f32);
            let ground_y = screen.destination(Half::Ground, row);
            let sky_y = screen.destination(Half::Sky, row);

            for x in 0..screen.w {
                let uv = projector.column(&slice, x as f32);
                self.put(x, ground_y, ground.sample(uv));
                self.put(x, sky_y, sky.sample(uv));
            }
        }

        self.end_frame(submit);
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}

pub mod fragment;
pub mod software;
pub mod terminal;

pub use software::Software;
pub use terminal::{Glyph, GlyphSampler, Terminal};
