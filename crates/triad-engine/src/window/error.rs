use std::fmt;

/// Where a run failed. Decides the process exit code.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailureStage {
    /// The windowing subsystem (event loop) could not start.
    Windowing,
    /// The OS window could not be created.
    Window,
    /// No suitable GL display, config, surface or context.
    Context,
    /// GL entry points could not be resolved or the context is too old.
    Loader,
    /// Shader build or geometry upload failed.
    Scene,
    /// Swapping buffers failed mid-run.
    Present,
    /// The event loop returned an error.
    EventLoop,
}

impl FailureStage {
    /// Process exit code for a failure at this stage.
    pub fn exit_code(self) -> i32 {
        match self {
            FailureStage::Windowing => 1,
            _ => -1,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FailureStage::Windowing => "windowing initialization failed",
            FailureStage::Window => "window creation failed",
            FailureStage::Context => "GL context creation failed",
            FailureStage::Loader => "GL loader initialization failed",
            FailureStage::Scene => "scene setup failed",
            FailureStage::Present => "frame presentation failed",
            FailureStage::EventLoop => "event loop failed",
        }
    }
}

/// Fatal error from [`Runtime::run`](super::Runtime::run).
#[derive(Debug)]
pub struct RunError {
    stage: FailureStage,
    source: anyhow::Error,
}

impl RunError {
    pub fn new(stage: FailureStage, source: anyhow::Error) -> Self {
        Self { stage, source }
    }

    pub fn stage(&self) -> FailureStage {
        self.stage
    }

    pub fn exit_code(&self) -> i32 {
        self.stage.exit_code()
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.stage.label(), self.source)
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
