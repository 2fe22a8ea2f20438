//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every failure aborts the current run; there is no partial-result recovery.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed ledger row or field.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported aggregation dimension.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// A report section name was inserted twice at one level.
    #[error("Duplicate report key: {0}")]
    DuplicateKey(String),

    /// A report section name was not found.
    #[error("Report key not found: {0}")]
    KeyNotFound(String),

    /// File read or write failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad command-line usage.
    #[error("Usage error: {0}")]
    Usage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Internal(_) => 1,
            Self::Config(_) | Self::Usage(_) => 2,
            Self::Parse(_) => 3,
            Self::InvalidDimension(_) => 4,
            Self::DuplicateKey(_) | Self::KeyNotFound(_) => 5,
            Self::Io(_) => 6,
        }
    }

    /// Returns the stable error code used in log output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::InvalidDimension(_) => "INVALID_DIMENSION",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::KeyNotFound(_) => "KEY_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Usage(_) => "USAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Internal(String::new()).exit_code(), 1);
        assert_eq!(AppError::Config(String::new()).exit_code(), 2);
        assert_eq!(AppError::Usage(String::new()).exit_code(), 2);
        assert_eq!(AppError::Parse(String::new()).exit_code(), 3);
        assert_eq!(AppError::InvalidDimension(String::new()).exit_code(), 4);
        assert_eq!(AppError::DuplicateKey(String::new()).exit_code(), 5);
        assert_eq!(AppError::KeyNotFound(String::new()).exit_code(), 5);
        assert_eq!(AppError::Io(String::new()).exit_code(), 6);
    }

    #[test]
    fn test_exit_codes_never_signal_success() {
        let errors = [
            AppError::Parse(String::new()),
            AppError::InvalidDimension(String::new()),
            AppError::DuplicateKey(String::new()),
            AppError::KeyNotFound(String::new()),
            AppError::Io(String::new()),
            AppError::Config(String::new()),
            AppError::Usage(String::new()),
            AppError::Internal(String::new()),
        ];
        for err in &errors {
            assert_ne!(err.exit_code(), 0, "{err}");
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Parse(String::new()).error_code(), "PARSE_ERROR");
        assert_eq!(
            AppError::InvalidDimension(String::new()).error_code(),
            "INVALID_DIMENSION"
        );
        assert_eq!(
            AppError::DuplicateKey(String::new()).error_code(),
            "DUPLICATE_KEY"
        );
        assert_eq!(
            AppError::KeyNotFound(String::new()).error_code(),
            "KEY_NOT_FOUND"
        );
        assert_eq!(AppError::Io(String::new()).error_code(), "IO_ERROR");
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Parse("line 3".into()).to_string(),
            "Parse error: line 3"
        );
        assert_eq!(
            AppError::InvalidDimension("quarter".into()).to_string(),
            "Invalid dimension: quarter"
        );
        assert_eq!(
            AppError::DuplicateKey("df".into()).to_string(),
            "Duplicate report key: df"
        );
        assert_eq!(
            AppError::KeyNotFound("df".into()).to_string(),
            "Report key not found: df"
        );
        assert_eq!(AppError::Io("disk".into()).to_string(), "I/O error: disk");
    }
}
