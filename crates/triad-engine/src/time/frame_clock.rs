use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Zero-based index of this frame.
    pub frame_index: u64,

    /// Time since the clock started.
    pub since_start: Duration,
}

/// Counts presented frames for one render session.
#[derive(Debug, Clone)]
pub struct FrameClock {
    started: Instant,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frames: 0,
        }
    }

    /// Advances the clock and returns the snapshot for the frame about to be
    /// drawn.
    pub fn tick(&mut self) -> FrameTime {
        let ft = FrameTime {
            frame_index: self.frames,
            since_start: self.started.elapsed(),
        };
        self.frames = self.frames.wrapping_add(1);
        ft
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
