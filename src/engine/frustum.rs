//! View frustum on the ground plane.
//!
//! ```text
//!   far_left ───────────── far_right      (top    = far plane)
//!        \                   /
//!         \                 /
//!    near_left ─────── near_right         (bottom = near plane)
//!              \     /
//!               cam
//! ```
//!
//! Every screen row picks a depth slice between the near and far corners,
//! every column picks a point along that slice. Both blends are linear:
//! classic affine Mode7, no divide by depth.

use glam::Vec2;

use crate::world::Camera;

/// The four corners of the frustum, derived from one camera snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub near_left: Vec2,
    pub far_left: Vec2,
    pub near_right: Vec2,
    pub far_right: Vec2,
}

/// Sampling segment for one screen row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthSlice {
    pub left: Vec2,
    pub right: Vec2,
}

impl Frustum {
    /// Walk each edge from the camera position out to the near and far
    /// distances.
    pub fn from_camera(cam: &Camera) -> Self {
        let pos = cam.pos();
        let dir_left = cam.edge_left();
        let dir_right = cam.edge_right();

        Self {
            near_left: pos + dir_left * cam.near(),
            far_left: pos + dir_left * cam.far(),
            near_right: pos + dir_right * cam.near(),
            far_right: pos + dir_right * cam.far(),
        }
    }

    /// Blend both edges from near (`t_row = 0`) towards far (`t_row = 1`).
    #[inline(always)]
    pub fn depth_slice(&self, t_row: f32) -> DepthSlice {
        DepthSlice {
            left: self.near_left + (self.far_left - self.near_left) * t_row,
            right: self.near_right + (self.far_right - self.near_right) * t_row,
        }
    }
}

impl DepthSlice {
    /// Blend from the left end (`t_col = 0`) towards the right end.
    #[inline(always)]
    pub fn at(&self, t_col: f32) -> Vec2 {
        self.left + (self.right - self.left) * t_col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn corners_for_axis_aligned_camera() {
        // heading 0, edges at ±90° → left edge points -Y, right edge +Y
        let cam = Camera::new(vec2(1.0, 2.0), 0.0, -FRAC_PI_2, FRAC_PI_2, 1.0, 3.0).unwrap();
        let f = Frustum::from_camera(&cam);
        assert!((f.near_left - vec2(1.0, 1.0)).length() < 1e-5);
        assert!((f.far_left - vec2(1.0, -1.0)).length() < 1e-5);
        assert!((f.near_right - vec2(1.0, 3.0)).length() < 1e-5);
        assert!((f.far_right - vec2(1.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn rebuilding_from_same_snapshot_is_idempotent() {
        let cam = Camera::new(vec2(3.5, -7.0), 1.2, -0.6, 0.4, 0.1, 0.9).unwrap();
        let snapshot = cam;
        assert_eq!(Frustum::from_camera(&snapshot), Frustum::from_camera(&snapshot));
        assert_eq!(cam, snapshot);
    }

    #[test]
    fn slice_endpoints() {
        let cam = Camera::new(Vec2::ZERO, 0.3, -0.5, 0.5, 0.2, 1.0).unwrap();
        let f = Frustum::from_camera(&cam);
        let near = f.depth_slice(0.0);
        assert_eq!(near.left, f.near_left);
        assert_eq!(near.right, f.near_right);
        assert_eq!(near.at(0.0), f.near_left);

        let far = f.depth_slice(1.0);
        assert!((far.left - f.far_left).length() < 1e-6);
        assert!((far.at(1.0) - f.far_right).length() < 1e-6);
    }
}
