//! Tracing subscriber initialization.
//!
//! Log lines go to a file under the platform data directory so a running
//! GUI session can be inspected with `tail -f`. `RUST_LOG` is respected,
//! the default level is `info`.

use std::path::PathBuf;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "clarity-timeline.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("no platform data directory available")]
    NoDataDir,
    #[error("could not create log directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory the log file lives in, when the platform provides one.
pub fn log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "clarity-timeline")
        .map(|dirs| dirs.data_dir().join("logs"))
}

/// Set up file-based logging. Called once at startup; the caller decides
/// what to do when no log directory is available.
pub fn init() -> Result<(), LoggingError> {
    let dir = log_dir().ok_or(LoggingError::NoDataDir)?;
    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::DirectoryCreation {
        path: dir.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(appender)
        .with_ansi(false)
        .init();
    Ok(())
}
