use glam::Vec2;

use crate::{
    engine::{
        frustum::{DepthSlice, Frustum},
        types::{Half, Screen},
    },
    world::Camera,
};

/// Texture coordinate for half-screen pixel (`row`, `col`).
///
/// `row` is in `0 .. screen.half_h`, `col` in `0 .. screen.w`. Values outside
/// those ranges extrapolate along the same lines instead of failing.
///
/// Rebuilds the frustum on every call; per-frame callers should hold a
/// [`Projector`] instead.
pub fn project(cam: &Camera, row: f32, col: f32, screen: &Screen) -> Vec2 {
    Projector::new(cam, *screen).project(row, col)
}

/// Frustum precomputed from one camera snapshot, shared read-only by every
/// pixel of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projector {
    frustum: Frustum,
    screen: Screen,
}

impl Projector {
    pub fn new(cam: &Camera, screen: Screen) -> Self {
        Self {
            frustum: Frustum::from_camera(cam),
            screen,
        }
    }

    #[inline]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Sampling segment for half-screen `row`; hoist it out of column loops.
    #[inline(always)]
    pub fn row_slice(&self, row: f32) -> DepthSlice {
        self.frustum.depth_slice(row / self.screen.half_h_f)
    }

    /// Texture coordinate of one column along a row slice.
    #[inline(always)]
    pub fn column(&self, slice: &DepthSlice, col: f32) -> Vec2 {
        slice.at(col / self.screen.w_f)
    }

    #[inline]
    pub fn project(&self, row: f32, col: f32) -> Vec2 {
        self.column(&self.row_slice(row), col)
    }

    /// Fragment-stage entry point.
    ///
    /// `frag` is an absolute full-frame position, origin top-left. The lower
    /// half maps to ground row `y - half_h`, the upper half to sky row
    /// `half_h - y`; `x` is the column unchanged.
    ///
    /// The sky mapping is the inverse of [`Screen::destination`], so `y = 0`
    /// reaches sky row `half_h`: `t_row = 1`, the far corners themselves.
    /// The half-screen drivers stop one row short and leave that screen row
    /// clear; fragments shaded at pixel centres (`y = 0.5`) stay below it.
    pub fn project_fragment(&self, frag: Vec2) -> (Half, Vec2) {
        let (half, row) = if frag.y >= self.screen.half_h_f {
            (Half::Ground, frag.y - self.screen.half_h_f)
        } else {
            (Half::Sky, self.screen.half_h_f - frag.y)
        };
        (half, self.project(row, frag.x))
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_4;

    fn reference() -> (Camera, Screen) {
        let cam =
            Camera::new(vec2(1000.0, 1000.0), 0.1, -FRAC_PI_4, FRAC_PI_4, 0.005, 0.03).unwrap();
        (cam, Screen::new(480, 320).unwrap())
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn reference_origin_pixel_is_near_left_corner() {
        let (cam, screen) = reference();
        let angle = 0.1 - FRAC_PI_4;
        let expected = vec2(1000.0, 1000.0) + vec2(angle.cos(), angle.sin()) * 0.005;

        let uv = project(&cam, 0.0, 0.0, &screen);
        assert!(close(uv, expected), "{uv:?} != {expected:?}");
        assert_eq!(uv, Projector::new(&cam, screen).frustum().near_left);
    }

    #[test]
    fn deterministic() {
        let (cam, screen) = reference();
        let p = Projector::new(&cam, screen);
        for (row, col) in [(0.0, 0.0), (17.0, 311.0), (159.0, 479.0)] {
            assert_eq!(p.project(row, col), p.project(row, col));
            assert_eq!(p.project(row, col), project(&cam, row, col, &screen));
        }
    }

    #[test]
    fn column_zero_is_left_side_point() {
        let (cam, screen) = reference();
        let p = Projector::new(&cam, screen);
        for row in [0.0, 40.0, 159.0] {
            assert_eq!(p.project(row, 0.0), p.row_slice(row).left);
        }
    }

    #[test]
    fn affine_in_column_and_row() {
        // small coordinates keep f32 error well below the tolerance
        let cam = Camera::new(vec2(0.5, -0.25), 0.7, -0.6, 0.5, 0.1, 2.0).unwrap();
        let p = Projector::new(&cam, Screen::new(480, 320).unwrap());

        // fixed row: equal column steps give equal coordinate steps
        let (a, b, c) = (p.project(50.0, 10.0), p.project(50.0, 110.0), p.project(50.0, 210.0));
        assert!(close(b - a, c - b));

        // fixed column: same for rows
        let (a, b, c) = (p.project(10.0, 77.0), p.project(60.0, 77.0), p.project(110.0, 77.0));
        assert!(close(b - a, c - b));
    }

    #[test]
    fn last_row_stays_short_of_far_plane() {
        let cam = Camera::new(Vec2::ZERO, 0.0, -0.5, 0.5, 1.0, 2.0).unwrap();
        let p = Projector::new(&cam, Screen::new(4, 4).unwrap());
        let f = *p.frustum();
        // half_h = 2 → last row samples t_row = 0.5
        let mid = (f.near_left + f.far_left) * 0.5;
        assert!(close(p.project(1.0, 0.0), mid));
    }

    #[test]
    fn zero_width_frustum_is_constant_across_columns() {
        let cam = Camera::new(vec2(2.0, 3.0), 0.4, 0.0, 0.0, 0.5, 1.5).unwrap();
        let p = Projector::new(&cam, Screen::new(480, 320).unwrap());
        let first = p.project(80.0, 0.0);
        for col in [1.0, 100.0, 479.0] {
            let uv = p.project(80.0, col);
            assert!(uv.is_finite());
            assert!(close(uv, first));
        }
    }

    #[test]
    fn fragment_halves_share_coordinates() {
        let (cam, screen) = reference();
        let p = Projector::new(&cam, screen);

        let (half, ground) = p.project_fragment(vec2(30.0, 160.0 + 25.0));
        assert_eq!(half, Half::Ground);
        assert_eq!(ground, p.project(25.0, 30.0));

        let (half, sky) = p.project_fragment(vec2(30.0, 160.0 - 25.0));
        assert_eq!(half, Half::Sky);
        assert_eq!(sky, ground);

        // horizon row belongs to the ground
        assert_eq!(p.project_fragment(vec2(0.0, 160.0)).0, Half::Ground);
    }

    #[test]
    fn top_edge_fragment_reaches_far_plane() {
        let cam = Camera::new(vec2(0.5, 0.5), 0.3, -0.6, 0.6, 0.1, 1.0).unwrap();
        let p = Projector::new(&cam, Screen::new(480, 320).unwrap());
        let f = *p.frustum();

        let (half, uv) = p.project_fragment(vec2(0.0, 0.0));
        assert_eq!(half, Half::Sky);
        assert!(close(uv, f.far_left));

        // pixel centre of the top row stays short of the far plane
        let (_, uv) = p.project_fragment(vec2(0.0, 0.5));
        assert!(close(uv, p.project(159.5, 0.0)));
        assert!((uv - f.far_left).length() > 1e-4);
    }
}
