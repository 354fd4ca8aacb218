//! Geometry buffer.
//!
//! Uploads position-only vertex data into a static GPU buffer and records its
//! layout in a vertex array object.

mod buffer;
mod layout;

pub use buffer::{upload, Mesh, VertexArray, VertexBuffer};
pub use layout::{Position, VertexAttribute, TRIANGLE_VERTICES};
