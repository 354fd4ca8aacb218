use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "triad_engine=debug").
///
/// Informational records go to stdout, warnings and errors to stderr.
#[derive(Debug)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Resolves the filter string to apply, in precedence order:
    /// explicit filter, `RUST_LOG`, then `"info"`.
    pub fn resolved_filter(&self, rust_log: Option<&str>) -> String {
        self.env_filter
            .as_deref()
            .or(rust_log)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string()
    }
}

const DEFAULT_FILTER: &str = "info";

/// Output stream a record is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    Stdout,
    Stderr,
}

/// Failures go to stderr, everything else to stdout.
pub(crate) fn stream_for(level: Level) -> Stream {
    match level {
        Level::Error | Level::Warn => Stream::Stderr,
        Level::Info | Level::Debug | Level::Trace => Stream::Stdout,
    }
}

/// Two `env_logger` instances sharing one filter, picked per record level.
struct SplitLogger {
    out: env_logger::Logger,
    err: env_logger::Logger,
}

impl SplitLogger {
    fn new(filter: &str, write_style: env_logger::WriteStyle) -> Self {
        let build = |target| {
            env_logger::Builder::new()
                .parse_filters(filter)
                .write_style(write_style)
                .target(target)
                .build()
        };
        Self {
            out: build(env_logger::Target::Stdout),
            err: build(env_logger::Target::Stderr),
        }
    }

    fn max_level(&self) -> LevelFilter {
        self.out.filter().max(self.err.filter())
    }

    fn route(&self, level: Level) -> &env_logger::Logger {
        match stream_for(level) {
            Stream::Stdout => &self.out,
            Stream::Stderr => &self.err,
        }
    }
}

impl Log for SplitLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.route(metadata.level()).enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        self.route(record.level()).log(record);
    }

    fn flush(&self) {
        self.out.flush();
        self.err.flush();
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = config.resolved_filter(rust_log.as_deref());

        let logger = SplitLogger::new(&filter, config.write_style);
        let max_level = logger.max_level();

        // An embedding test harness may already have installed a logger.
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(max_level);
            log::debug!("logging initialized (filter: {filter})");
        }
    });
}
