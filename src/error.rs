//! Error types for WP Guardian operations.
//!
//! This module defines [`GuardianError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing workspace is not an error; callers check and return early
//! - A fixer that exits non-zero is logged, never turned into an error
//! - Config-file write failures propagate as [`GuardianError::Io`]
//! - Use `anyhow::Error` (via `GuardianError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for WP Guardian operations.
#[derive(Debug, Error)]
pub enum GuardianError {
    /// Failed to parse `.wp-guardian.yml`.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A command id was executed that nothing registered.
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// An external process could not be started.
    #[error("Failed to launch '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    /// The filesystem watcher could not be set up or died.
    #[error("File watcher failed: {message}")]
    WatchFailed { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<notify::Error> for GuardianError {
    fn from(e: notify::Error) -> Self {
        Self::WatchFailed {
            message: e.to_string(),
        }
    }
}

/// Result type alias for WP Guardian operations.
pub type Result<T> = std::result::Result<T, GuardianError>;
