//! Canonical event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The fixed set of trackable interaction types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Click,
    Hover,
    Scroll,
    #[default]
    PageView,
    SessionStart,
    SessionEnd,
    ElementFocus,
    MouseMove,
    KeyPress,
    FormSubmit,
}

impl EventType {
    /// Every allowed wire name, in declaration order
    pub const NAMES: [&'static str; 10] = [
        "click",
        "hover",
        "scroll",
        "page_view",
        "session_start",
        "session_end",
        "element_focus",
        "mouse_move",
        "key_press",
        "form_submit",
    ];

    /// Wire name of this event type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Scroll => "scroll",
            Self::PageView => "page_view",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
            Self::ElementFocus => "element_focus",
            Self::MouseMove => "mouse_move",
            Self::KeyPress => "key_press",
            Self::FormSubmit => "form_submit",
        }
    }

    /// Parse a wire name into an event type
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "click" => Some(Self::Click),
            "hover" => Some(Self::Hover),
            "scroll" => Some(Self::Scroll),
            "page_view" => Some(Self::PageView),
            "session_start" => Some(Self::SessionStart),
            "session_end" => Some(Self::SessionEnd),
            "element_focus" => Some(Self::ElementFocus),
            "mouse_move" => Some(Self::MouseMove),
            "key_press" => Some(Self::KeyPress),
            "form_submit" => Some(Self::FormSubmit),
            _ => None,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical interaction record
///
/// The normalized, stored form of a submitted tracking event. `timestamp` is
/// the client-supplied instant (unix seconds); `received_at` is stamped by
/// the server at ingestion and the two are kept distinct on purpose.
/// Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interaction {
    /// Visitor this event belongs to
    pub user_id: String,
    /// What happened
    pub event_type: EventType,
    /// Client-side instant, unix seconds
    pub timestamp: f64,
    /// Session the event occurred in, if the client tracks one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// UI element identifier (e.g. "hashtag-UWCL", "nav-fixtures")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Page the event occurred on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    /// Event target descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Free-form value (input contents, link href, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Pointer x coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Pointer y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Scroll depth percentage (0-100)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_depth: Option<f64>,
    /// Duration in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Opaque client metadata, stored as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    /// Server ingestion instant
    #[serde(skip_serializing)]
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_round_trip() {
        for name in EventType::NAMES {
            let parsed = EventType::parse(name).expect(name);
            assert_eq!(parsed.as_str(), name);
        }
    }

    #[test]
    fn test_unknown_event_type() {
        assert_eq!(EventType::parse("purchase"), None);
        assert_eq!(EventType::parse("CLICK"), None);
        assert_eq!(EventType::parse(""), None);
    }
}
