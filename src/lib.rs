//! Mode7-style pseudo-3D ground/sky projection.
//!
//! For every screen pixel the [`engine::Projector`] sweeps a camera-relative
//! frustum across depth (rows) and width (columns) and returns the flat
//! texture coordinate to sample. The [`renderer`] module wraps it with the
//! ground/sky draw drivers.

pub mod config;
pub mod engine;
pub mod renderer;
pub mod world;
