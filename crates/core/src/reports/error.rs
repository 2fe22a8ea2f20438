//! Report error types.

use std::path::PathBuf;

use pfi_shared::AppError;
use thiserror::Error;

/// Errors that can occur while assembling or writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A section with this name already exists at the same level.
    #[error("Duplicate report key: {0}")]
    DuplicateKey(String),

    /// No section with this name exists at the level searched.
    #[error("Report key not found: {0}")]
    KeyNotFound(String),

    /// The report could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::KeyNotFound(_) => "KEY_NOT_FOUND",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::DuplicateKey(key) => Self::DuplicateKey(key),
            ReportError::KeyNotFound(key) => Self::KeyNotFound(key),
            ReportError::Io { .. } => Self::Io(err.to_string()),
        }
    }
}
