//! Visitor and session identifiers
//!
//! Two identifier formats are used throughout the platform as foreign keys:
//!
//! - User: `user_` + 12 lowercase hex chars (`user_3fa85f642b88`)
//! - Session: `session_` + 12 lowercase hex chars + `_` + unix seconds
//!   (`session_3fa85f642b88_1719412345`)
//!
//! The random token is the first 12 chars of a v4 UUID, which is plenty to
//! make collisions between anonymous visitors vanishingly unlikely.
//!
//! Validation is purely structural: the predicates never allocate an error
//! and never panic, so they are safe to call on arbitrary client input.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

/// Prefix for user identifiers
pub const USER_PREFIX: &str = "user_";

/// Prefix for session identifiers
pub const SESSION_PREFIX: &str = "session_";

/// Width of the random hex token in both formats
pub const TOKEN_LEN: usize = 12;

/// Generate a fresh user identifier
pub fn generate_user_id() -> String {
    format!("{}{}", USER_PREFIX, random_token())
}

/// Generate a fresh session identifier
///
/// The trailing field is the wall-clock unix time at generation, which keeps
/// session ids sortable by creation without a database round-trip.
pub fn generate_session_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}{}_{}", SESSION_PREFIX, random_token(), now)
}

/// Check whether a string is a well-formed user identifier
pub fn is_valid_user_id(id: &str) -> bool {
    match id.strip_prefix(USER_PREFIX) {
        Some(token) => is_hex_token(token),
        None => false,
    }
}

/// Check whether a string is a well-formed session identifier
pub fn is_valid_session_id(id: &str) -> bool {
    if !id.starts_with(SESSION_PREFIX) {
        return false;
    }

    // "session" / token / unix-seconds
    let parts: Vec<&str> = id.split('_').collect();
    if parts.len() != 3 {
        return false;
    }

    is_hex_token(parts[1]) && parts[2].parse::<u64>().is_ok()
}

fn random_token() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..TOKEN_LEN].to_string()
}

fn is_hex_token(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}
