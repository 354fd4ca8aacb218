//! Shader builder.
//!
//! Compiles GLSL stages into [`ShaderObject`]s and links them into a
//! [`ShaderProgram`]. Both carry their status flag and the driver's diagnostic
//! text; every object releases its GL name on drop.
//!
//! The low-level [`compile`] and [`link`] report and continue. [`build`] runs
//! the whole sequence and applies a [`ShaderPolicy`] on top.

mod error;
mod object;
mod program;
mod source;

pub use error::ShaderError;
pub use object::{compile, ShaderObject};
pub use program::{build, link, ShaderPolicy, ShaderProgram};
pub use source::{ShaderSources, ShaderStage};
