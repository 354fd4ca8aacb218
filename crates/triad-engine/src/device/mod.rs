//! OpenGL device + window context management.
//!
//! This module is responsible for:
//! - creating the window, GL display, surface and core-profile context
//! - resolving GL entry points through `glow`
//! - exposing the narrow [`GlApi`] seam every GPU object is written against

mod api;
mod context;
mod init;
mod native;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{BufferUsage, GlApi, Topology};
pub use context::ContextWindow;
pub use init::{ContextProfile, GlInit};
pub use native::Gl;
