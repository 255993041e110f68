use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Send log messages to the file at `path`, appending to it if it already
/// exists.  The terminal belongs to the game while it's running, so nothing
/// is ever logged to stdout or stderr.
///
/// The level filter is taken from `RUST_LOG`, defaulting to `info`.
pub(crate) fn init(path: &Path) -> Result<(), LogError> {
    let file = open_log_file(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LogError::Install(e.to_string()))
}

/// Open `path` for appending, creating it and its parent directories if
/// needed
fn open_log_file(path: &Path) -> Result<fs_err::File, LogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(LogError::Open)?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LogError::Open)
}

#[derive(Debug, Error)]
pub(crate) enum LogError {
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("failed to install logger: {0}")]
    Install(String),
}
