//! Session boundary repository
//!
//! One row per session start, keyed by (user, session). The composite
//! primary key keeps at most one row per pair, so a retried or duplicated
//! `session_start` is absorbed rather than double-counted.

use chrono::{DateTime, Utc};
use tracing::debug;
use turso::Database;

use super::{is_unique_violation, parse_instant};
use crate::error::Result;

/// Stored session record
#[derive(Debug, Clone)]
pub struct Session {
    /// Owning user
    pub user_id: String,
    /// Session identifier (`session_` + 12 hex + unix seconds)
    pub session_id: String,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session ended; `None` while open
    pub ended_at: Option<DateTime<Utc>>,
    /// Whether the session is still open
    pub active: bool,
}

/// Session boundary repository
pub struct SessionRepo<'a> {
    db: &'a Database,
}

impl<'a> SessionRepo<'a> {
    /// Create a new session repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Record a session start
    ///
    /// Returns `true` when a new session row was created, `false` when the
    /// (user, session) pair was already known — callers should only bump the
    /// user's session counter on `true`.
    pub async fn start(&self, user_id: &str, session_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let now = Utc::now().to_rfc3339();

        let result = conn
            .execute(
                r#"
            INSERT INTO sessions (user_id, session_id, started_at, ended_at, active)
            VALUES (?1, ?2, ?3, '', 1)
            "#,
                [user_id, session_id, now.as_str()],
            )
            .await;

        match result {
            Ok(_) => {
                debug!(user_id, session_id, "Session started");
                Ok(true)
            }
            Err(e) if is_unique_violation(&e) => {
                debug!(user_id, session_id, "Session already started");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Record a session end
    ///
    /// Marks the matching open session inactive. Ending a session that was
    /// never started (or is already closed) is a no-op and returns `false`;
    /// it is not an error.
    pub async fn end(&self, user_id: &str, session_id: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let now = Utc::now().to_rfc3339();

        let updated = conn
            .execute(
                r#"
            UPDATE sessions SET ended_at = ?1, active = 0
            WHERE user_id = ?2 AND session_id = ?3 AND active = 1
            "#,
                [now.as_str(), user_id, session_id],
            )
            .await?;

        if updated > 0 {
            debug!(user_id, session_id, "Session ended");
        }
        Ok(updated > 0)
    }

    /// Get a session by (user, session) pair
    pub async fn get(&self, user_id: &str, session_id: &str) -> Result<Option<Session>> {
        let conn = self.db.connect()?;

        let mut rows = conn
            .query(
                "SELECT * FROM sessions WHERE user_id = ?1 AND session_id = ?2",
                [user_id, session_id],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_session(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Count all recorded sessions
    pub async fn count(&self) -> Result<u64> {
        let conn = self.db.connect()?;

        let mut rows = conn
            .query("SELECT COUNT(*) as count FROM sessions", ())
            .await?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(count as u64)
        } else {
            Ok(0)
        }
    }

    fn row_to_session(row: &turso::Row) -> Result<Session> {
        let user_id: String = row.get(0)?;
        let session_id: String = row.get(1)?;
        let started_at_str: String = row.get(2)?;
        let ended_at_str = row.get_value(3)?.as_text().cloned().unwrap_or_default();
        let active = *row.get_value(4)?.as_integer().unwrap_or(&0) != 0;

        let ended_at = if ended_at_str.is_empty() {
            None
        } else {
            Some(parse_instant("ended_at", &ended_at_str)?)
        };

        Ok(Session {
            user_id,
            session_id,
            started_at: parse_instant("started_at", &started_at_str)?,
            ended_at,
            active,
        })
    }
}
