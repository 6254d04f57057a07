//! Payload normalization
//!
//! Shapes a validated payload into the canonical [`Interaction`] record.
//! Field handling is an allow-list: anything outside the recognized set is
//! dropped silently rather than rejected. String fields are scrubbed of
//! angle brackets and surrounding whitespace before storage. The whole step
//! is total and idempotent; only validation can reject.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::event::{EventType, Interaction};

/// Build the canonical record from a validated payload
///
/// `received_at` is the server ingestion instant, assigned here and kept
/// distinct from the client-supplied `timestamp`.
pub fn normalize_event(data: &Value, received_at: DateTime<Utc>) -> Interaction {
    let empty = Map::new();
    let obj = data.as_object().unwrap_or(&empty);

    // Validation guarantees the parse; the default only covers a payload
    // that skipped it.
    let event_type = obj
        .get("event_type")
        .and_then(Value::as_str)
        .and_then(EventType::parse)
        .unwrap_or_default();

    Interaction {
        user_id: scrub(obj.get("user_id")).unwrap_or_default(),
        event_type,
        timestamp: obj.get("timestamp").and_then(Value::as_f64).unwrap_or(0.0),
        session_id: scrub(obj.get("session_id")),
        element: scrub(obj.get("element")),
        page_url: scrub(obj.get("page_url")),
        target: scrub(obj.get("target")),
        value: scrub(obj.get("value")),
        x: obj.get("x").and_then(Value::as_f64),
        y: obj.get("y").and_then(Value::as_f64),
        scroll_depth: obj.get("scroll_depth").and_then(Value::as_f64),
        duration: obj.get("duration").and_then(Value::as_f64),
        metadata: obj.get("metadata").cloned(),
        received_at,
    }
}

/// Strip angle brackets and surrounding whitespace from a string field
fn scrub(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?;
    Some(s.replace(['<', '>'], "").trim().to_string())
}
