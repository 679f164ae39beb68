//! Projection core: screen geometry, frustum corners and the per-pixel
//! texture-coordinate lookup. Pure arithmetic, no I/O.

pub mod frustum;
pub mod projection;
pub mod types;

pub use frustum::{DepthSlice, Frustum};
pub use projection::{Projector, project};
pub use types::{Half, Screen, ScreenError};
