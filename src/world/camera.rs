use glam::{Vec2, vec2};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Smallest near-plane distance the interactive adjusters will go down to.
const MIN_NEAR: f32 = 1e-4;

/// Widest half field of view `widen` opens up to.
const MAX_HALF_FOV: f32 = FRAC_PI_2 - 1e-3;

/// Things that make a camera unusable for projection.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CameraError {
    /// Position, heading, offsets or distances contain NaN / infinity.
    #[error("camera parameter `{0}` is not finite")]
    NotFinite(&'static str),

    /// `near` must be strictly positive.
    #[error("near-plane distance {0} must be > 0")]
    NearNotPositive(f32),

    /// `far` must lie beyond `near`.
    #[error("far-plane distance {far} must be greater than near-plane distance {near}")]
    FarNotBeyondNear { near: f32, far: f32 },
}

/// Ground-plane view-point.
///
/// * `pos` is in texture space (1.0 = one full texture width).
/// * `heading` is in radians, 0 = +X, counter-clockwise positive.
/// * `fov_left` / `fov_right` are offsets added to the heading to get the
///   two frustum edges.
///
/// The type is `Copy`: a plain copy taken before a frame is the read-only
/// snapshot the projector works from while input handling keeps mutating
/// the live camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pos: Vec2,
    heading: f32,
    fov_left: f32,
    fov_right: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Build a camera, rejecting parameters that cannot bound a frustum.
    ///
    /// Equal FOV offsets are accepted: they give a zero-width frustum whose
    /// projection is constant across every screen column.
    pub fn new(
        pos: Vec2,
        heading: f32,
        fov_left: f32,
        fov_right: f32,
        near: f32,
        far: f32,
    ) -> Result<Self, CameraError> {
        let fields = [
            ("pos.x", pos.x),
            ("pos.y", pos.y),
            ("heading", heading),
            ("fov_left", fov_left),
            ("fov_right", fov_right),
            ("near", near),
            ("far", far),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CameraError::NotFinite(*name));
        }
        if near <= 0.0 {
            return Err(CameraError::NearNotPositive(near));
        }
        if far <= near {
            return Err(CameraError::FarNotBeyondNear { near, far });
        }
        if fov_left == fov_right {
            tracing::debug!(fov = fov_left, "camera has a zero-width frustum");
        }

        Ok(Self {
            pos,
            heading,
            fov_left,
            fov_right,
            near,
            far,
        })
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// `(left, right)` angular offsets relative to the heading.
    #[inline]
    pub fn fov_offsets(&self) -> (f32, f32) {
        (self.fov_left, self.fov_right)
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    /*──────────────────────── derived vectors ───────────────────────*/

    /// Unit vector along `angle`: the X axis rotated counter-clockwise.
    #[inline(always)]
    fn direction(angle: f32) -> Vec2 {
        let (s, c) = angle.sin_cos();
        vec2(c, s)
    }

    /// Unit vector pointing where the camera looks.
    #[inline(always)]
    pub fn forward(self) -> Vec2 {
        Self::direction(self.heading)
    }

    /// Unit vector of the left frustum edge (`heading + fov_left`).
    #[inline(always)]
    pub fn edge_left(self) -> Vec2 {
        Self::direction(self.heading + self.fov_left)
    }

    /// Unit vector of the right frustum edge (`heading + fov_right`).
    #[inline(always)]
    pub fn edge_right(self) -> Vec2 {
        Self::direction(self.heading + self.fov_right)
    }

    /*──────────────────────── movement helpers ──────────────────────*/

    /// Move `distance` units along the heading (negative = backwards).
    pub fn step(&mut self, distance: f32) {
        self.pos += self.forward() * distance;
    }

    /// Rotate the heading; the result is kept in `[0, TAU)`.
    pub fn turn(&mut self, delta: f32) {
        self.heading = (self.heading + delta).rem_euclid(TAU);
    }

    /*──────────────────────── frustum tuning ────────────────────────*/

    /// Push the near plane by `delta`, clamped to stay inside `(0, far)`.
    ///
    /// A far plane closer than `2 * MIN_NEAR` caps near at `far / 2`.
    pub fn adjust_near(&mut self, delta: f32) {
        let max = (self.far - MIN_NEAR).max(self.far * 0.5);
        self.near = (self.near + delta).clamp(MIN_NEAR.min(max), max);
    }

    /// Push the far plane by `delta`; it never comes closer than `near`.
    pub fn adjust_far(&mut self, delta: f32) {
        self.far = (self.far + delta).max(self.near + MIN_NEAR);
    }

    /// Open (positive) or close the field of view symmetrically around the
    /// middle of the two edges.
    ///
    /// Opening stops at a half-angle just under `PI/2`, closing at zero. A
    /// camera built wider than that is never narrowed by opening it further.
    pub fn widen(&mut self, delta: f32) {
        if delta == 0.0 {
            return;
        }
        let mid = (self.fov_left + self.fov_right) * 0.5;
        let current = (self.fov_right - self.fov_left).abs() * 0.5;
        let half = (current + delta * 0.5).clamp(0.0, MAX_HALF_FOV.max(current));
        let sign = if self.fov_right >= self.fov_left { 1.0 } else { -1.0 };
        self.fov_left = mid - half * sign;
        self.fov_right = mid + half * sign;
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
