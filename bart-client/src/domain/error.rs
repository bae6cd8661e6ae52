//! Domain error types.
//!
//! These errors represent request parameters that the API would reject
//! or silently misinterpret. They are raised before any network traffic and
//! are distinct from transport/API errors.

/// Domain-level errors for parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Station abbreviation is malformed
    #[error("invalid station abbreviation {value:?}: {reason}")]
    InvalidStation { value: String, reason: &'static str },

    /// Platform number outside 1-4
    #[error("invalid platform {0:?}: must be a number between 1 and 4")]
    InvalidPlatform(String),

    /// Direction is neither north nor south
    #[error("invalid direction {0:?}: expected n or s")]
    InvalidDirection(String),

    /// Trip count (before/after) outside 0-4
    #[error("invalid {field} trip count {value}: must be between 0 and 4")]
    InvalidTripCount { field: &'static str, value: u8 },

    /// Date string could not be parsed
    #[error("invalid date {0:?}: expected today, now, or mm/dd/yyyy")]
    InvalidDate(String),

    /// Time string could not be parsed
    #[error("invalid time {0:?}: expected h:mm followed by am or pm")]
    InvalidTime(String),
}
