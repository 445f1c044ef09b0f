//! Error types for the database watcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the database watcher.
///
/// Rebuild failures are not among them: those are logged and the watcher
/// keeps the previous index until the next change.
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize watcher: {reason}")]
    InitFailed { reason: String },

    #[error("Cannot watch database directory {path}: {reason}")]
    PathWatchFailed { path: PathBuf, reason: String },

    #[error("Database path {path} has no parent directory to watch")]
    NoParentDirectory { path: PathBuf },

    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

impl From<notify::Error> for WatchError {
    fn from(e: notify::Error) -> Self {
        WatchError::InitFailed {
            reason: e.to_string(),
        }
    }
}
