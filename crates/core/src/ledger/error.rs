//! Ledger error types for parsing and I/O failures.

use std::path::PathBuf;

use pfi_shared::AppError;
use thiserror::Error;

/// Errors that can occur while reading a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A source row or one of its fields could not be parsed.
    #[error("{source_name}:{line}: invalid {field}: {message}")]
    Parse {
        /// Display name of the source (file path or label).
        source_name: String,
        /// 1-based line number in the source.
        line: u64,
        /// Offending field (`date`, `desc`, `amount`, `balance`, or `row`).
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The ledger file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Parse { .. } => Self::Parse(err.to_string()),
            LedgerError::Io { .. } => Self::Io(err.to_string()),
        }
    }
}
