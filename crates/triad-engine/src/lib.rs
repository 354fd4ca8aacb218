//! Triad engine crate.
//!
//! Owns the window + OpenGL context plumbing, the shader builder, the
//! static triangle mesh and the render loop that ties them together.

pub mod device;
pub mod window;
pub mod time;

pub mod logging;
pub mod mesh;
pub mod render;
pub mod shader;
