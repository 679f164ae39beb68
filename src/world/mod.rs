mod camera;
mod texture;

pub use camera::{Camera, CameraError};

pub use texture::{Texture, TextureError, Wrap, lerp_rgb};
