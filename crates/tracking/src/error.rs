//! Validation error types

use thiserror::Error;

use crate::event::EventType;

/// Reasons an inbound event is rejected
///
/// Every variant renders to the human-readable reason string returned to the
/// client. Rejection is an expected outcome, not a fault: handlers turn these
/// into a structured 400, never a 500.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Payload was not a JSON object
    #[error("event payload must be a JSON object")]
    NotAnObject,

    /// A required key is absent
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// user_id does not match the identifier grammar
    #[error("invalid user_id format")]
    InvalidUserId,

    /// event_type is outside the allowed set
    #[error("invalid event_type, must be one of: {}", EventType::NAMES.join(", "))]
    UnknownEventType,

    /// timestamp is not numeric
    #[error("timestamp must be a number")]
    TimestampNotNumeric,

    /// timestamp is outside the allowed clock-skew window
    #[error("timestamp is too far from current time")]
    TimestampOutOfRange,

    /// session_id does not match the identifier grammar
    #[error("invalid session_id format")]
    InvalidSessionId,

    /// A string-typed optional field carried a non-string value
    #[error("{field} must be a string")]
    NotAString { field: &'static str },

    /// A string field exceeds its length cap
    #[error("{field} exceeds maximum length of {max}")]
    StringTooLong { field: &'static str, max: usize },

    /// A numeric-typed optional field carried a non-numeric value
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    /// A numeric field is outside its allowed bounds
    #[error("{field} must be between {min} and {max}")]
    NumberOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}
