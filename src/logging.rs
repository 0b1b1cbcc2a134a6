//! Tracing setup. The TUI owns the terminal, so logs go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the `EnvFilter` directives, e.g. `CABO_LOG=debug`.
pub const LOG_ENV: &str = "CABO_LOG";

const DEFAULT_DIRECTIVES: &str = "info";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Open(String),
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

/// Filter from `CABO_LOG`, falling back to `info` when unset or invalid.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install a global plain-text subscriber appending to `path`.
pub fn init_file_logging(path: &Path) -> Result<(), LoggingError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::Open(format!("{}: {e}", path.display())))?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::AlreadyInstalled)?;
    tracing::info!(path = %path.display(), "logging started");
    Ok(())
}
