use std::fmt;

use super::ShaderStage;

/// Failure while building a shader program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The driver refused to allocate a shader or program name.
    Create { what: &'static str, message: String },
    /// A shader object was passed to the wrong `link` slot.
    StageMismatch { expected: ShaderStage, found: ShaderStage },
    /// A stage failed to compile (strict policy only).
    Compile { stage: ShaderStage, log: String },
    /// The program failed to link (strict policy only).
    Link { log: String },
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Create { what, message } => {
                write!(f, "failed to create {what}: {message}")
            }
            ShaderError::StageMismatch { expected, found } => {
                write!(f, "expected a {expected} shader, got a {found} shader")
            }
            ShaderError::Compile { stage, log } => {
                write!(f, "{stage} shader compilation failed: {}", log.trim_end())
            }
            ShaderError::Link { log } => {
                write!(f, "shader program linking failed: {}", log.trim_end())
            }
        }
    }
}

impl std::error::Error for ShaderError {}
