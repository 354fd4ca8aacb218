use std::process::ExitCode;

use triad_engine::device::GlInit;
use triad_engine::logging::{init_logging, LoggingConfig};
use triad_engine::render::SceneDesc;
use triad_engine::window::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    match Runtime::run(RuntimeConfig::default(), GlInit::default(), SceneDesc::default()) {
        Ok(summary) => {
            log::debug!("rendered {} frames", summary.frames);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            // -1 surfaces as 255, the same status a C `return -1` produces.
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
