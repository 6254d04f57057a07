//! Request fingerprint capture
//!
//! A fingerprint is the client metadata snapshot taken the first time a
//! user identifier is seen: request headers plus whatever the tracking
//! script reported about the device. Soft identification only, never
//! authentication.

use axum::http::HeaderMap;
use serde_json::{Map, Value};

/// Build a fingerprint from request headers and event metadata
pub fn capture(headers: &HeaderMap, metadata: Option<&Value>) -> Value {
    let mut fingerprint = Map::new();

    for (key, header) in [
        ("user_agent", "user-agent"),
        ("accept_language", "accept-language"),
        ("ip_address", "x-forwarded-for"),
    ] {
        if let Some(value) = headers.get(header).and_then(|v| v.to_str().ok()) {
            fingerprint.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    if let Some(meta) = metadata.and_then(Value::as_object) {
        for key in ["screen_resolution", "timezone"] {
            if let Some(value) = meta.get(key) {
                fingerprint.insert(key.to_string(), value.clone());
            }
        }
    }

    Value::Object(fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capture_from_headers_and_metadata() {
        let mut headers = HeaderMap::new();
        headers.insert("user-agent", "Mozilla/5.0".parse().unwrap());
        headers.insert("accept-language", "nl-BE,nl".parse().unwrap());

        let metadata = json!({"screen_resolution": "1920x1080", "timezone": "Europe/Brussels", "extra": 1});
        let fingerprint = capture(&headers, Some(&metadata));

        assert_eq!(fingerprint["user_agent"], "Mozilla/5.0");
        assert_eq!(fingerprint["accept_language"], "nl-BE,nl");
        assert_eq!(fingerprint["screen_resolution"], "1920x1080");
        assert_eq!(fingerprint["timezone"], "Europe/Brussels");
        // only the recognized metadata keys are captured
        assert!(fingerprint.get("extra").is_none());
    }

    #[test]
    fn test_capture_with_nothing_available() {
        let fingerprint = capture(&HeaderMap::new(), None);
        assert_eq!(fingerprint, json!({}));
    }
}
