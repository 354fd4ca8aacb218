//! Time subsystem.
//!
//! Frame counting for the render loop, decoupled from the runtime so it can be
//! tested on its own.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
