//! Core error types for the ledger core.
//!
//! Each domain module defines its own error enum; this module wraps them in a
//! single root type so callers can propagate everything with `?`.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

use crate::fees::FeeError;
use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger core.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Fee error: {0}")]
    Fee(#[from] FeeError),

    #[error("Failed to load configuration: {0}")]
    Config(String),
}

/// Validation errors for caller input and persisted data.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required argument was absent or outside its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Shorthand for `Error::Validation(ValidationError::InvalidArgument(..))`.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidArgument(message.into()))
    }

    /// Returns true for the `InvalidArgument` condition.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::Validation(ValidationError::InvalidArgument(_))
                | Error::Validation(ValidationError::MissingField(_))
        )
    }
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
