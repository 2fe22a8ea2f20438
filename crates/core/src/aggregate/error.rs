//! Aggregation error types.

use pfi_shared::AppError;
use thiserror::Error;

/// Errors that can occur while aggregating a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The dimension name is not one of the supported calendar dimensions.
    #[error("Invalid dimension: {0} (expected one of year, yearmonth, month, weekday_abbr, hour)")]
    InvalidDimension(String),
}

impl AggregateError {
    /// Returns the error code for log output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimension(_) => "INVALID_DIMENSION",
        }
    }
}

impl From<AggregateError> for AppError {
    fn from(err: AggregateError) -> Self {
        match err {
            AggregateError::InvalidDimension(name) => Self::InvalidDimension(name),
        }
    }
}
