//! Logging setup
//!
//! The interactive UI owns stdout/stderr, so diagnostics go to a log file via
//! `tracing-subscriber`. The file lives next to the executable unless a path
//! is given. If it cannot be opened, logging is silently disabled.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Default log file name
pub const LOG_FILE_NAME: &str = "userdir.log";

/// Get the default log file path (same directory as executable)
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

/// Build the level filter. `RUST_LOG` wins over the `level` argument.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the global subscriber.
///
/// Returns the path actually logged to, or `None` when logging is off.
pub fn init(path: Option<&Path>, level: &str) -> Option<PathBuf> {
    let log_path = path.map(Path::to_path_buf).unwrap_or_else(default_log_path);

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(&log_path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(log_path)
}
