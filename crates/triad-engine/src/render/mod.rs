//! Per-frame rendering.
//!
//! A [`TriangleScene`] owns every GPU object the frame needs (program, vertex
//! array, vertex buffer) and knows how to clear and draw one frame.

mod color;
mod scene;

pub use color::Color;
pub use scene::{center_pixel, SceneDesc, TriangleScene};
