//! Error types for CME Watch.
//!
//! All configuration errors are recoverable: a rejected update leaves the
//! store unchanged and surfaces the error to the caller for user-visible
//! feedback. Stable numeric codes support machine parsing of CLI output.

use thiserror::Error;

/// Result type alias for CME Watch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for CME Watch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unknown parameter identifier.
    #[error("unknown parameter: {0}")]
    InvalidParameter(String),

    /// Threshold value outside its declared range.
    #[error("value {value} for {parameter} outside range [{min}, {max}]")]
    OutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Sensitivity percentage outside [0, 100].
    #[error("sensitivity {0} outside [0, 100]")]
    InvalidSensitivity(i64),

    /// Combined-metric weight outside [0, 1].
    #[error("weight {weight} for {parameter} outside [0, 1]")]
    InvalidWeight { parameter: String, weight: f64 },

    /// Derived parameter outside its declared bounds.
    #[error("invalid value for {field}: {message}")]
    InvalidDerived { field: String, message: String },

    /// Config file I/O failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Config file parse failure.
    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Stable error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            Error::InvalidParameter(_) => 10,
            Error::OutOfRange { .. } => 11,
            Error::InvalidSensitivity(_) => 12,
            Error::InvalidWeight { .. } => 13,
            Error::InvalidDerived { .. } => 14,
            Error::Io(_) => 20,
            Error::Parse(_) => 21,
        }
    }
}
