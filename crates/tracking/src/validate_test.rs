//! Tests for the validation rules

use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::error::ValidationError;
use crate::validate::validate_event;

fn now() -> chrono::DateTime<chrono::Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn base_event() -> serde_json::Value {
    json!({
        "user_id": "user_abcdef123456",
        "event_type": "click",
        "timestamp": now().timestamp(),
    })
}

#[test]
fn test_accepts_minimal_event() {
    assert_eq!(validate_event(&base_event(), now()), Ok(()));
}

#[test]
fn test_accepts_fully_populated_event() {
    let mut event = base_event();
    let obj = event.as_object_mut().unwrap();
    obj.insert(
        "session_id".into(),
        json!("session_abcdef123456_1748779200"),
    );
    obj.insert("element".into(), json!("hashtag-UWCL"));
    obj.insert("page_url".into(), json!("https://example.com/fixtures"));
    obj.insert("target".into(), json!("a.fixture-link"));
    obj.insert("value".into(), json!("Arsenal vs Chelsea"));
    obj.insert("x".into(), json!(412));
    obj.insert("y".into(), json!(1080.5));
    obj.insert("scroll_depth".into(), json!(55));
    obj.insert("duration".into(), json!(1200));
    obj.insert("metadata".into(), json!({"screen_resolution": "1920x1080"}));

    assert_eq!(validate_event(&event, now()), Ok(()));
}

#[test]
fn test_rejects_non_object() {
    for payload in [json!([1, 2]), json!("event"), json!(42), json!(null)] {
        assert_eq!(
            validate_event(&payload, now()),
            Err(ValidationError::NotAnObject)
        );
    }
}

#[test]
fn test_rejects_missing_required_fields() {
    for field in ["user_id", "event_type", "timestamp"] {
        let mut event = base_event();
        event.as_object_mut().unwrap().remove(field);

        let err = validate_event(&event, now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField(field));
        assert_eq!(err.to_string(), format!("missing required field: {field}"));
    }
}

#[test]
fn test_rejects_malformed_user_id() {
    for bad in ["visitor_abcdef123456", "user_xyz", "user_ABCDEF123456", ""] {
        let mut event = base_event();
        event["user_id"] = json!(bad);
        assert_eq!(
            validate_event(&event, now()),
            Err(ValidationError::InvalidUserId)
        );
    }

    // a non-string user_id fails the same way
    let mut event = base_event();
    event["user_id"] = json!(12345);
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::InvalidUserId)
    );
}

#[test]
fn test_rejects_unknown_event_type() {
    // outside the allowed set, regardless of other field validity
    for bad in ["purchase", "Click", "CLICK", "", "page-view"] {
        let mut event = base_event();
        event["event_type"] = json!(bad);

        let err = validate_event(&event, now()).unwrap_err();
        assert_eq!(err, ValidationError::UnknownEventType);
        assert!(err.to_string().contains("click"));
        assert!(err.to_string().contains("form_submit"));
    }
}

#[test]
fn test_accepts_every_allowed_event_type() {
    for name in crate::event::EventType::NAMES {
        let mut event = base_event();
        event["event_type"] = json!(name);
        assert_eq!(validate_event(&event, now()), Ok(()), "{name}");
    }
}

#[test]
fn test_rejects_non_numeric_timestamp() {
    let mut event = base_event();
    event["timestamp"] = json!("1748779200");
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::TimestampNotNumeric)
    );
}

#[test]
fn test_timestamp_skew_window() {
    // inside the window: never the rejection cause
    for offset in [0, 10, 3600, -3600] {
        let mut event = base_event();
        event["timestamp"] = json!(now().timestamp() + offset);
        assert_eq!(validate_event(&event, now()), Ok(()), "offset {offset}");
    }

    // outside the window: rejected in both directions
    for offset in [3601, -3601, 86_400] {
        let mut event = base_event();
        event["timestamp"] = json!(now().timestamp() + offset);
        assert_eq!(
            validate_event(&event, now()),
            Err(ValidationError::TimestampOutOfRange),
            "offset {offset}"
        );
    }
}

#[test]
fn test_accepts_float_timestamp() {
    let mut event = base_event();
    event["timestamp"] = json!(now().timestamp() as f64 + 0.25);
    assert_eq!(validate_event(&event, now()), Ok(()));
}

#[test]
fn test_rejects_malformed_session_id() {
    for bad in ["sess_abc", "session_abcdef123456", "session_abcdef123456_x"] {
        let mut event = base_event();
        event["session_id"] = json!(bad);
        assert_eq!(
            validate_event(&event, now()),
            Err(ValidationError::InvalidSessionId)
        );
    }
}

#[test]
fn test_rejects_non_string_optional_fields() {
    for field in ["element", "page_url", "target", "value"] {
        let mut event = base_event();
        event[field] = json!(7);
        assert_eq!(
            validate_event(&event, now()),
            Err(ValidationError::NotAString { field }),
        );
    }
}

#[test]
fn test_string_length_caps() {
    let mut event = base_event();
    event["element"] = json!("e".repeat(500));
    assert_eq!(validate_event(&event, now()), Ok(()));

    event["element"] = json!("e".repeat(501));
    let err = validate_event(&event, now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::StringTooLong {
            field: "element",
            max: 500
        }
    );
    assert_eq!(err.to_string(), "element exceeds maximum length of 500");

    // page_url gets the larger cap
    let mut event = base_event();
    event["page_url"] = json!("u".repeat(2000));
    assert_eq!(validate_event(&event, now()), Ok(()));

    event["page_url"] = json!("u".repeat(2001));
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::StringTooLong {
            field: "page_url",
            max: 2000
        })
    );
}

#[test]
fn test_rejects_non_numeric_metric_fields() {
    for field in ["x", "y", "scroll_depth", "duration"] {
        let mut event = base_event();
        event[field] = json!("12");
        assert_eq!(
            validate_event(&event, now()),
            Err(ValidationError::NotANumber { field }),
        );
    }
}

#[test]
fn test_coordinate_bounds() {
    let mut event = base_event();
    event["x"] = json!(10_000);
    assert_eq!(validate_event(&event, now()), Ok(()));

    event["x"] = json!(10_001);
    let err = validate_event(&event, now()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::NumberOutOfRange {
            field: "x",
            min: 0,
            max: 10_000
        }
    );
    assert_eq!(err.to_string(), "x must be between 0 and 10000");

    event["x"] = json!(-1);
    assert!(validate_event(&event, now()).is_err());
}

#[test]
fn test_scroll_depth_and_duration_bounds() {
    let mut event = base_event();
    event["scroll_depth"] = json!(101);
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::NumberOutOfRange {
            field: "scroll_depth",
            min: 0,
            max: 100
        })
    );

    let mut event = base_event();
    event["duration"] = json!(86_400_001);
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::NumberOutOfRange {
            field: "duration",
            min: 0,
            max: 86_400_000
        })
    );

    let mut event = base_event();
    event["duration"] = json!(86_400_000);
    assert_eq!(validate_event(&event, now()), Ok(()));
}

#[test]
fn test_unknown_keys_do_not_reject() {
    let mut event = base_event();
    event["campaign"] = json!("spring-launch");
    event["nested"] = json!({"a": [1, 2, 3]});
    assert_eq!(validate_event(&event, now()), Ok(()));
}

#[test]
fn test_first_failure_wins() {
    // both user_id and event_type are bad; user_id is checked first
    let event = json!({
        "user_id": "nope",
        "event_type": "nope",
        "timestamp": now().timestamp(),
    });
    assert_eq!(
        validate_event(&event, now()),
        Err(ValidationError::InvalidUserId)
    );
}
