//! Error type shared by every scan operation.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between receiving a scan request and
/// holding the image bytes.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The scanner executable is not present at its configured location.
    #[error("NAPS2 not found: {}", .path.display())]
    ExecutableMissing {
        /// Resolved location that was checked.
        path: PathBuf,
    },

    /// The scanner ran but did not leave an artifact behind. `message` is the
    /// text the scanner printed, or a generic fallback.
    #[error("{message}")]
    ScanFailed {
        /// Caller-facing reason.
        message: String,
    },

    /// The OS refused to start the scanner process.
    #[error("failed to launch scanner {}: {source}", .path.display())]
    Spawn {
        /// Executable that failed to start.
        path: PathBuf,
        /// Underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the artifact or probing the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The task driving the device was cancelled or panicked.
    #[error("scan interrupted: {0}")]
    Interrupted(String),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScanError>;
