/// Render loop state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Close-flag bookkeeping for the render loop.
///
/// The loop runs until the window asks to close or, when a frame limit is
/// set, until that many frames have been presented. Termination is final.
#[derive(Debug, Clone)]
pub struct LoopControl {
    state: LoopState,
    frame_limit: Option<u64>,
}

impl LoopControl {
    pub fn new(frame_limit: Option<u64>) -> Self {
        let state = match frame_limit {
            Some(0) => LoopState::Terminated,
            _ => LoopState::Running,
        };
        Self { state, frame_limit }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn close_requested(&mut self) {
        self.state = LoopState::Terminated;
    }

    /// Records that `presented` frames have been shown in total.
    pub fn frame_presented(&mut self, presented: u64) {
        if self.frame_limit.is_some_and(|limit| presented >= limit) {
            self.state = LoopState::Terminated;
        }
    }

    /// True if frame `frame_index` is the last one before the frame limit.
    pub fn is_last_frame(&self, frame_index: u64) -> bool {
        self.frame_limit
            .is_some_and(|limit| frame_index.saturating_add(1) == limit)
    }
}
