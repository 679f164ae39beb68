//! ---------------------------------------------------------------------------
//! Software (CPU) frame-buffer renderer
//!
//! * Fills a `Vec<u32>` frame-buffer in **0x00RRGGBB** format.
//! * `render_par` produces the same image as the sequential
//!   [`RendererExt::draw_frame`](crate::renderer::RendererExt::draw_frame)
//!   but walks *output* rows on the rayon pool, so no two threads ever touch
//!   the same row.
//! ---------------------------------------------------------------------------

use rayon::prelude::*;

use crate::{
    engine::{Half, Projector, Screen},
    renderer::{Renderer, Rgba, Sampler},
};

/// Dark-grey clear; only screen row 0 keeps it after a full frame.
pub const CLEAR: Rgba = 0x00_202020;

#[derive(Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    type Appearance = Rgba;

    fn begin_frame(&mut self, w: usize, h: usize) {
        // (re)allocate if resolution changed
        if w != self.width || h != self.height {
            self.width = w;
            self.height = h;
            self.scratch.resize(w * h, CLEAR);
        }
        self.scratch.fill(CLEAR);
    }

    #[inline(always)]
    fn put(&mut self, x: usize, y: usize, px: Rgba) {
        if x < self.width && y < self.height {
            self.scratch[y * self.width + x] = px;
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Rgba], usize, usize),
    {
        submit(&self.scratch, self.width, self.height);
    }
}

impl Software {
    /// Parallel ground/sky pass, finishing with `end_frame(submit)`.
    pub fn render_par<G, S, F>(&mut self, projector: &Projector, ground: &G, sky: &S, submit: F)
    where
        G: Sampler<Appearance = Rgba> + Sync,
        S: Sampler<Appearance = Rgba> + Sync,
        F: FnOnce(&[Rgba], usize, usize),
    {
        let screen = *projector.screen();
        self.begin_frame(screen.w, screen.h);

        self.scratch
            .par_chunks_mut(screen.w)
            .enumerate()
            .for_each(|(y, line)| {
                let Some((half, row)) = source_row(&screen, y) else {
                    return;
                };
                let slice = projector.row_slice(row as f32);
                for (x, px) in line.iter_mut().enumerate() {
                    let uv = projector.column(&slice, x as f32);
                    *px = match half {
                        Half::Ground => ground.sample(uv),
                        Half::Sky => sky.sample(uv),
                    };
                }
            });

        self.end_frame(submit);
    }
}

/// Inverse of [`Screen::destination`]: which pass, if any, owns output row `y`.
///
/// The horizon row is claimed by the sky, matching the write order of the
/// sequential driver.
fn source_row(screen: &Screen, y: usize) -> Option<(Half, usize)> {
    let half = screen.half_h;
    if (1..=half).contains(&y) {
        Some((Half::Sky, half - y))
    } else if y > half && y - half < half {
        Some((Half::Ground, y - half))
    } else {
        None
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
