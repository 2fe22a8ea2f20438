//! Fixture generator error types.

use std::path::PathBuf;

use pfi_shared::AppError;
use thiserror::Error;

/// Errors that can occur while writing generated ledgers.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A row could not be serialized or written.
    #[error("failed to write ledger row: {0}")]
    Write(#[from] csv::Error),

    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Write(_) | Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<GeneratorError> for AppError {
    fn from(err: GeneratorError) -> Self {
        Self::Io(err.to_string())
    }
}
