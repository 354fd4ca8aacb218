//! Window + runtime loop.
//!
//! Owns the `winit` event loop, opens the GL window, and drives the
//! poll → clear → draw → present cycle until the window closes.

mod error;
mod runtime;
mod state;

pub use error::{FailureStage, RunError};
pub use runtime::{Runtime, RuntimeConfig, RunSummary};
pub use state::{LoopControl, LoopState};
