/// Geometry that is invalid for a split ground/sky screen.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScreenError {
    #[error("screen width must be > 0")]
    ZeroWidth,

    /// `h / 2` is a divisor of every row interpolant.
    #[error("screen height {0} leaves no rows for a half (need at least 2)")]
    ZeroHalfHeight(usize),
}

/// Which vertical half of the screen a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Half {
    /// Lower half, written at `half_h + row`.
    Ground,
    /// Upper half, mirrored: written at `half_h - row`.
    Sky,
}

/// Constants that depend on the *frame-buffer*, not on the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Screen {
    pub w: usize,
    pub h: usize,
    pub half_h: usize,
    pub w_f: f32,      // pre-derived for speed
    pub half_h_f: f32, // pre-derived for speed
}

impl Screen {
    /// Validate once so per-pixel code can divide by `w` and `half_h`
    /// without checking. Odd heights are accepted; the bottom row is then
    /// never written.
    pub fn new(w: usize, h: usize) -> Result<Self, ScreenError> {
        if w == 0 {
            return Err(ScreenError::ZeroWidth);
        }
        let half_h = h / 2;
        if half_h == 0 {
            return Err(ScreenError::ZeroHalfHeight(h));
        }
        Ok(Self {
            w,
            h,
            half_h,
            w_f: w as f32,
            half_h_f: half_h as f32,
        })
    }

    /// Output row for half-screen `row` (`0 .. half_h`) of `half`.
    ///
    /// Row 0 of both halves lands on `half_h`; the sky pass never reaches
    /// screen row 0.
    #[inline(always)]
    pub fn destination(&self, half: Half, row: usize) -> usize {
        match half {
            Half::Ground => self.half_h + row,
            Half::Sky => self.half_h - row,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_sizes() {
        assert_eq!(Screen::new(0, 320), Err(ScreenError::ZeroWidth));
        assert_eq!(Screen::new(480, 1), Err(ScreenError::ZeroHalfHeight(1)));
        assert_eq!(Screen::new(480, 0), Err(ScreenError::ZeroHalfHeight(0)));
    }

    #[test]
    fn mirrored_destinations() {
        let s = Screen::new(480, 320).unwrap();
        assert_eq!(s.half_h, 160);
        assert_eq!(s.destination(Half::Ground, 0), 160);
        assert_eq!(s.destination(Half::Ground, 159), 319);
        assert_eq!(s.destination(Half::Sky, 0), 160);
        assert_eq!(s.destination(Half::Sky, 159), 1);
    }

    #[test]
    fn odd_height_rounds_half_down() {
        let s = Screen::new(4, 5).unwrap();
        assert_eq!(s.half_h, 2);
        assert_eq!(s.destination(Half::Ground, 1), 3);
    }
}
