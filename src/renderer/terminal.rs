//! Text-console back-end: every cell is a shade glyph plus an xterm-256
//! colour index, written out as ANSI escape sequences.

use std::io::{self, Write};

use glam::Vec2;

use crate::{
    renderer::{Renderer, Rgba, Sampler},
    world::{Texture, Wrap},
};

/// Darkest → brightest.
const SHADE_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One console cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// xterm-256 palette index.
    pub colour: u8,
}

impl Glyph {
    pub const BLANK: Glyph = Glyph { ch: ' ', colour: 0 };

    /// Shade glyph by luminance, colour from the 6×6×6 xterm cube.
    pub fn from_rgb(rgb: Rgba) -> Self {
        let (r, g, b) = ((rgb >> 16) & 0xFF, (rgb >> 8) & 0xFF, rgb & 0xFF);
        let luma = (r * 299 + g * 587 + b * 114) / 1000; // 0‥255
        let ch = SHADE_RAMP[luma as usize * (SHADE_RAMP.len() - 1) / 255];
        let cube = |c: u32| (c * 5 + 127) / 255; // 0‥5
        let colour = 16 + 36 * cube(r) + 6 * cube(g) + cube(b);
        Self {
            ch,
            colour: colour as u8,
        }
    }
}

/// Texture → glyph sampler; [`Wrap::Blank`] leaves empty cells.
#[derive(Clone, Copy, Debug)]
pub struct GlyphSampler<'a> {
    pub texture: &'a Texture,
    pub wrap: Wrap,
}

impl Sampler for GlyphSampler<'_> {
    type Appearance = Glyph;

    #[inline]
    fn sample(&self, uv: Vec2) -> Glyph {
        self.texture
            .sample_nearest(uv, self.wrap)
            .map_or(Glyph::BLANK, Glyph::from_rgb)
    }
}

#[derive(Default)]
pub struct Terminal {
    cells: Vec<Glyph>,
    width: usize,
    height: usize,
}

impl Renderer for Terminal {
    type Appearance = Glyph;

    fn begin_frame(&mut self, w: usize, h: usize) {
        self.width = w;
        self.height = h;
        self.cells.clear();
        self.cells.resize(w * h, Glyph::BLANK);
    }

    #[inline(always)]
    fn put(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = g;
        }
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&[Glyph], usize, usize),
    {
        submit(&self.cells, self.width, self.height);
    }
}

/// Write a finished frame as ANSI text, one line per row.
///
/// The colour escape is only re-emitted when it changes; the stream ends
/// with a reset.
pub fn write_ansi<W: Write>(out: &mut W, cells: &[Glyph], width: usize) -> io::Result<()> {
    let mut current: Option<u8> = None;
    for line in cells.chunks(width.max(1)) {
        for g in line {
            if current != Some(g.colour) {
                write!(out, "\x1b[38;5;{}m", g.colour)?;
                current = Some(g.colour);
            }
            write!(out, "{}", g.ch)?;
        }
        writeln!(out)?;
    }
    write!(out, "\x1b[0m")?;
    Ok(())
}
