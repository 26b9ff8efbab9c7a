//! Error types surfaced to the presentation layer.

use thiserror::Error;

/// Failure reported by an access-layer backend.
///
/// The in-memory mock never produces one; a networked backend would.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The operation did not complete.
    #[error("operation failed: {0}")]
    OperationFailure(String),
}

/// Form input rejected before any access-layer call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty after trimming.
    #[error("Please fill in all required fields ({0} is missing)")]
    MissingField(&'static str),

    /// A numeric field could not be parsed.
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// A numeric field was below zero.
    #[error("{0} cannot be negative")]
    Negative(&'static str),

    /// The ride date was not `YYYY-MM-DD`.
    #[error("Date must be in YYYY-MM-DD format, got '{0}'")]
    InvalidDate(String),

    /// The ride time was not `HH:MM`.
    #[error("Time must be in HH:MM format, got '{0}'")]
    InvalidTime(String),

    /// The ride date lies before today.
    #[error("Please select today or a future date")]
    DateInPast,

    /// Seat count outside the allowed range.
    #[error("Seats must be between 1 and 2")]
    SeatsOutOfRange(i64),
}

/// Convenience alias for access-layer results.
pub type ApiResult<T> = Result<T, ApiError>;
