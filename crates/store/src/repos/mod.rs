//! Storage repositories

pub mod interactions;
pub mod sessions;
pub mod users;

use crate::error::{Result, StoreError};

/// Parse an RFC 3339 column into a UTC instant
pub(crate) fn parse_instant(
    field: &'static str,
    raw: &str,
) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| StoreError::invalid(field, e.to_string()))
}

/// Whether a storage error is a unique-key conflict
///
/// Turso surfaces constraint failures as generic errors; the message is the
/// only discriminator, same as the upstream SQLite text.
pub(crate) fn is_unique_violation(err: &turso::Error) -> bool {
    err.to_string().contains("UNIQUE constraint")
}
