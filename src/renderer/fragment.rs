//! Per-fragment path, shaped like a fragment shader.
//!
//! A fragment arrives as an absolute full-frame position, not pre-split into
//! halves, and fetches its own filtered colour. [`render_fragments`] runs it
//! over every pixel centre of a buffer.

use glam::{Vec2, vec2};
use rayon::prelude::*;

use crate::{
    engine::{Half, Projector},
    renderer::Rgba,
    world::Texture,
};

/// Colour of the fragment at `frag` (origin top-left, pixel units).
#[inline]
pub fn shade(projector: &Projector, frag: Vec2, ground: &Texture, sky: &Texture) -> Rgba {
    let (half, uv) = projector.project_fragment(frag);
    match half {
        Half::Ground => ground.sample_bilinear(uv),
        Half::Sky => sky.sample_bilinear(uv),
    }
}

/// Shade every pixel of `out` (`screen.w × screen.h`, row-major) at its
/// centre.
pub fn render_fragments(projector: &Projector, ground: &Texture, sky: &Texture, out: &mut [Rgba]) {
    let screen = projector.screen();
    debug_assert_eq!(out.len(), screen.w * screen.h);

    out.par_chunks_mut(screen.w)
        .enumerate()
        .for_each(|(y, line)| {
            for (x, px) in line.iter_mut().enumerate() {
                let frag = vec2(x as f32 + 0.5, y as f32 + 0.5);
                *px = shade(projector, frag, ground, sky);
            }
        });
}
