//! Validation rules for inbound tracking payloads
//!
//! Rules run in a fixed order and the first failure wins, so clients always
//! see the most fundamental problem first (shape before fields, fields
//! before bounds).

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::ValidationError;
use crate::event::EventType;

/// Length cap for element / target / value strings
pub const MAX_STRING_LEN: usize = 500;

/// Length cap for page URLs
pub const MAX_URL_LEN: usize = 2000;

/// Allowed distance between client timestamp and server time, in seconds
pub const MAX_CLOCK_SKEW_SECS: f64 = 3600.0;

/// Upper bound for pointer coordinates
pub const MAX_COORDINATE: f64 = 10_000.0;

/// Upper bound for scroll depth (percentage)
pub const MAX_SCROLL_DEPTH: f64 = 100.0;

/// Upper bound for durations (one day, in milliseconds)
pub const MAX_DURATION_MS: f64 = 86_400_000.0;

const REQUIRED_FIELDS: [&str; 3] = ["user_id", "event_type", "timestamp"];
const STRING_FIELDS: [&str; 4] = ["element", "page_url", "target", "value"];
const NUMERIC_FIELDS: [&str; 4] = ["x", "y", "scroll_depth", "duration"];

/// Check an inbound payload against the tracking rules
///
/// `now` is the server instant the whole call is judged against; it is read
/// once by the caller and never re-read mid-validation.
pub fn validate_event(data: &Value, now: DateTime<Utc>) -> Result<(), ValidationError> {
    let obj = data.as_object().ok_or(ValidationError::NotAnObject)?;

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(field) {
            return Err(ValidationError::MissingField(field));
        }
    }

    let user_id = obj["user_id"].as_str().unwrap_or_default();
    if !sideline_ident::is_valid_user_id(user_id) {
        return Err(ValidationError::InvalidUserId);
    }

    let event_type = obj["event_type"].as_str().unwrap_or_default();
    if EventType::parse(event_type).is_none() {
        return Err(ValidationError::UnknownEventType);
    }

    let timestamp = obj["timestamp"]
        .as_f64()
        .ok_or(ValidationError::TimestampNotNumeric)?;
    if (now.timestamp() as f64 - timestamp).abs() > MAX_CLOCK_SKEW_SECS {
        return Err(ValidationError::TimestampOutOfRange);
    }

    if let Some(session_id) = obj.get("session_id") {
        let session_id = session_id.as_str().unwrap_or_default();
        if !sideline_ident::is_valid_session_id(session_id) {
            return Err(ValidationError::InvalidSessionId);
        }
    }

    for field in STRING_FIELDS {
        if let Some(value) = obj.get(field) {
            let s = value
                .as_str()
                .ok_or(ValidationError::NotAString { field })?;

            let max = if field == "page_url" {
                MAX_URL_LEN
            } else {
                MAX_STRING_LEN
            };
            if s.chars().count() > max {
                return Err(ValidationError::StringTooLong { field, max });
            }
        }
    }

    for field in NUMERIC_FIELDS {
        if let Some(value) = obj.get(field) {
            let n = value
                .as_f64()
                .ok_or(ValidationError::NotANumber { field })?;

            let (min, max) = bounds_for(field);
            if n < min || n > max {
                return Err(ValidationError::NumberOutOfRange {
                    field,
                    min: min as i64,
                    max: max as i64,
                });
            }
        }
    }

    Ok(())
}

fn bounds_for(field: &str) -> (f64, f64) {
    match field {
        "scroll_depth" => (0.0, MAX_SCROLL_DEPTH),
        "duration" => (0.0, MAX_DURATION_MS),
        _ => (0.0, MAX_COORDINATE),
    }
}
