//! User directory repository
//!
//! One row per distinct visitor ever seen. Creation is idempotent (the
//! primary key absorbs concurrent duplicates) and counter updates are single
//! atomic statements, so the directory stays consistent under any number of
//! concurrent ingestion requests.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info};
use turso::Database;

use super::{is_unique_violation, parse_instant};
use crate::error::Result;

/// Stored user record
#[derive(Debug, Clone)]
pub struct User {
    /// Visitor identifier (`user_` + 12 hex)
    pub user_id: String,
    /// Client/request metadata captured at first sight, never overwritten
    pub fingerprint: Value,
    /// Free-form metadata
    pub metadata: Value,
    /// When the user was first seen
    pub created_at: DateTime<Utc>,
    /// Last accepted event or session boundary for this user
    pub last_seen: DateTime<Utc>,
    /// Lifetime accepted-event count
    pub total_interactions: i64,
    /// Lifetime session count
    pub total_sessions: i64,
}

impl User {
    /// Create a new user record with zero counters
    pub fn new(user_id: impl Into<String>, fingerprint: Value) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.into(),
            fingerprint,
            metadata: Value::Object(serde_json::Map::new()),
            created_at: now,
            last_seen: now,
            total_interactions: 0,
            total_sessions: 0,
        }
    }
}

/// User directory repository
pub struct UserRepo<'a> {
    db: &'a Database,
}

impl<'a> UserRepo<'a> {
    /// Create a new user repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create the user if absent
    ///
    /// Returns `true` when a row was created, `false` when the user already
    /// existed. A concurrent duplicate insert loses against the primary key
    /// and is absorbed here as "already exists" — never an error, so the
    /// first caller's fingerprint always wins.
    pub async fn ensure(&self, user: &User) -> Result<bool> {
        let conn = self.db.connect()?;

        let fingerprint = serde_json::to_string(&user.fingerprint)?;
        let metadata = serde_json::to_string(&user.metadata)?;
        let created_at = user.created_at.to_rfc3339();
        let last_seen = user.last_seen.to_rfc3339();

        let result = conn
            .execute(
                r#"
            INSERT INTO users (user_id, fingerprint, metadata, created_at, last_seen, total_interactions, total_sessions)
            VALUES (?1, ?2, ?3, ?4, ?5, 0, 0)
            "#,
                [
                    user.user_id.as_str(),
                    fingerprint.as_str(),
                    metadata.as_str(),
                    created_at.as_str(),
                    last_seen.as_str(),
                ],
            )
            .await;

        match result {
            Ok(_) => {
                info!(user_id = %user.user_id, "Created user");
                Ok(true)
            }
            Err(e) if is_unique_violation(&e) => {
                debug!(user_id = %user.user_id, "User already exists");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by identifier
    pub async fn get(&self, user_id: &str) -> Result<Option<User>> {
        let conn = self.db.connect()?;

        let mut rows = conn
            .query("SELECT * FROM users WHERE user_id = ?1", [user_id])
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Update the user's last-seen instant
    ///
    /// Callers on the ingestion path treat failures here as best-effort:
    /// log and continue, the event itself is already stored.
    pub async fn touch_last_seen(&self, user_id: &str) -> Result<()> {
        let conn = self.db.connect()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "UPDATE users SET last_seen = ?1 WHERE user_id = ?2",
            [now.as_str(), user_id],
        )
        .await?;

        Ok(())
    }

    /// Atomically bump the interaction counter
    pub async fn increment_interactions(&self, user_id: &str) -> Result<()> {
        let conn = self.db.connect()?;

        conn.execute(
            "UPDATE users SET total_interactions = total_interactions + 1 WHERE user_id = ?1",
            [user_id],
        )
        .await?;

        Ok(())
    }

    /// Atomically bump the session counter
    pub async fn increment_sessions(&self, user_id: &str) -> Result<()> {
        let conn = self.db.connect()?;

        conn.execute(
            "UPDATE users SET total_sessions = total_sessions + 1 WHERE user_id = ?1",
            [user_id],
        )
        .await?;

        Ok(())
    }

    /// Count all users
    pub async fn count(&self) -> Result<u64> {
        let conn = self.db.connect()?;

        let mut rows = conn
            .query("SELECT COUNT(*) as count FROM users", ())
            .await?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(count as u64)
        } else {
            Ok(0)
        }
    }

    /// Count users created at or after the cutoff
    pub async fn count_created_since(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let conn = self.db.connect()?;
        let cutoff = cutoff.to_rfc3339();

        let mut rows = conn
            .query(
                "SELECT COUNT(*) as count FROM users WHERE created_at >= ?1",
                [cutoff.as_str()],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(count as u64)
        } else {
            Ok(0)
        }
    }

    /// List users in storage order
    pub async fn list(&self, limit: u32, skip: u32) -> Result<Vec<User>> {
        let conn = self.db.connect()?;

        let sql = format!("SELECT * FROM users LIMIT {} OFFSET {}", limit, skip);
        let mut rows = conn.query(&sql, ()).await?;

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(Self::row_to_user(&row)?);
        }

        Ok(users)
    }

    fn row_to_user(row: &turso::Row) -> Result<User> {
        let user_id: String = row.get(0)?;
        let fingerprint_json: String = row.get(1)?;
        let metadata_json: String = row.get(2)?;
        let created_at_str: String = row.get(3)?;
        let last_seen_str: String = row.get(4)?;
        let total_interactions = *row.get_value(5)?.as_integer().unwrap_or(&0);
        let total_sessions = *row.get_value(6)?.as_integer().unwrap_or(&0);

        let fingerprint = serde_json::from_str(&fingerprint_json)
            .unwrap_or(Value::Object(serde_json::Map::new()));
        let metadata =
            serde_json::from_str(&metadata_json).unwrap_or(Value::Object(serde_json::Map::new()));

        Ok(User {
            user_id,
            fingerprint,
            metadata,
            created_at: parse_instant("created_at", &created_at_str)?,
            last_seen: parse_instant("last_seen", &last_seen_str)?,
            total_interactions,
            total_sessions,
        })
    }
}
