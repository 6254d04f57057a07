//! Event store repository
//!
//! Append-only persistence for canonical interaction records, plus the
//! range and group queries the aggregation engine reads. Nothing here is
//! precomputed; every query runs against the live table at request time.

use serde_json::Value;
use sideline_tracking::{EventType, Interaction};
use turso::Database;

use super::parse_instant;
use crate::error::Result;

/// Event store repository
pub struct InteractionRepo<'a> {
    db: &'a Database,
}

impl<'a> InteractionRepo<'a> {
    /// Create a new interaction repository
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Append a canonical interaction record
    pub async fn insert(&self, interaction: &Interaction) -> Result<()> {
        let conn = self.db.connect()?;

        let id = uuid::Uuid::new_v4().to_string();
        let timestamp = interaction.timestamp.to_string();
        let x = opt_num(interaction.x);
        let y = opt_num(interaction.y);
        let scroll_depth = opt_num(interaction.scroll_depth);
        let duration = opt_num(interaction.duration);
        let metadata = match &interaction.metadata {
            Some(value) => serde_json::to_string(value)?,
            None => String::new(),
        };
        let received_at = interaction.received_at.to_rfc3339();

        conn.execute(
            r#"
            INSERT INTO interactions (
                id, user_id, event_type, timestamp, session_id,
                element, page_url, target, value,
                x, y, scroll_depth, duration, metadata, received_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            [
                id.as_str(),
                interaction.user_id.as_str(),
                interaction.event_type.as_str(),
                timestamp.as_str(),
                interaction.session_id.as_deref().unwrap_or(""),
                interaction.element.as_deref().unwrap_or(""),
                interaction.page_url.as_deref().unwrap_or(""),
                interaction.target.as_deref().unwrap_or(""),
                interaction.value.as_deref().unwrap_or(""),
                x.as_str(),
                y.as_str(),
                scroll_depth.as_str(),
                duration.as_str(),
                metadata.as_str(),
                received_at.as_str(),
            ],
        )
        .await?;

        Ok(())
    }

    /// Most recent records for a user, newest first
    pub async fn recent_for_user(&self, user_id: &str, limit: u32) -> Result<Vec<Interaction>> {
        let conn = self.db.connect()?;

        let sql = format!(
            "SELECT * FROM interactions WHERE user_id = ?1 ORDER BY timestamp DESC LIMIT {}",
            limit
        );
        let mut rows = conn.query(&sql, [user_id]).await?;

        let mut interactions = Vec::new();
        while let Some(row) = rows.next().await? {
            interactions.push(Self::row_to_interaction(&row)?);
        }

        Ok(interactions)
    }

    /// Click events with a timestamp at or after the cutoff (unix seconds)
    pub async fn clicks_since(&self, cutoff: f64) -> Result<Vec<Interaction>> {
        let conn = self.db.connect()?;
        let cutoff = cutoff.to_string();

        let mut rows = conn
            .query(
                "SELECT * FROM interactions WHERE event_type = 'click' AND timestamp >= ?1",
                [cutoff.as_str()],
            )
            .await?;

        let mut interactions = Vec::new();
        while let Some(row) = rows.next().await? {
            interactions.push(Self::row_to_interaction(&row)?);
        }

        Ok(interactions)
    }

    /// Count all stored interactions
    pub async fn count(&self) -> Result<u64> {
        let conn = self.db.connect()?;

        let mut rows = conn
            .query("SELECT COUNT(*) as count FROM interactions", ())
            .await?;

        if let Some(row) = rows.next().await? {
            let count: i64 = row.get(0)?;
            Ok(count as u64)
        } else {
            Ok(0)
        }
    }

    /// Event types ranked by frequency across all time
    pub async fn count_by_event_type(&self, limit: u32) -> Result<Vec<(String, u64)>> {
        self.group_count("event_type", limit).await
    }

    /// Users ranked by stored interaction records
    pub async fn top_users(&self, limit: u32) -> Result<Vec<(String, u64)>> {
        self.group_count("user_id", limit).await
    }

    async fn group_count(&self, column: &str, limit: u32) -> Result<Vec<(String, u64)>> {
        let conn = self.db.connect()?;

        // column comes from the two callers above, never from input
        let sql = format!(
            "SELECT {col}, COUNT(*) as count FROM interactions GROUP BY {col} ORDER BY count DESC LIMIT {limit}",
            col = column,
            limit = limit
        );

        let mut rows = conn.query(&sql, ()).await?;

        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            let key: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            counts.push((key, count as u64));
        }

        Ok(counts)
    }

    fn row_to_interaction(row: &turso::Row) -> Result<Interaction> {
        let user_id: String = row.get(1)?;
        let event_type_str: String = row.get(2)?;
        let timestamp = *row.get_value(3)?.as_real().unwrap_or(&0.0);
        let received_at_str: String = row.get(14)?;

        let metadata_json = row.get_value(13)?.as_text().cloned().unwrap_or_default();
        let metadata: Option<Value> = if metadata_json.is_empty() {
            None
        } else {
            serde_json::from_str(&metadata_json).ok()
        };

        Ok(Interaction {
            user_id,
            event_type: EventType::parse(&event_type_str).unwrap_or_default(),
            timestamp,
            session_id: opt_text(row, 4)?,
            element: opt_text(row, 5)?,
            page_url: opt_text(row, 6)?,
            target: opt_text(row, 7)?,
            value: opt_text(row, 8)?,
            x: opt_real(row, 9)?,
            y: opt_real(row, 10)?,
            scroll_depth: opt_real(row, 11)?,
            duration: opt_real(row, 12)?,
            metadata,
            received_at: parse_instant("received_at", &received_at_str)?,
        })
    }
}

/// Format an optional numeric column value; absent binds as empty text
fn opt_num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Read a nullable text column, mapping empty to `None`
fn opt_text(row: &turso::Row, index: usize) -> Result<Option<String>> {
    let raw = row.get_value(index)?.as_text().cloned().unwrap_or_default();
    if raw.is_empty() { Ok(None) } else { Ok(Some(raw)) }
}

/// Read a nullable numeric column
fn opt_real(row: &turso::Row, index: usize) -> Result<Option<f64>> {
    Ok(row.get_value(index)?.as_real().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storage;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(user_id: &str, event_type: EventType, timestamp: f64) -> Interaction {
        Interaction {
            user_id: user_id.to_string(),
            event_type,
            timestamp,
            session_id: None,
            element: None,
            page_url: None,
            target: None,
            value: None,
            x: None,
            y: None,
            scroll_depth: None,
            duration: None,
            metadata: None,
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let storage = Storage::new_memory().await.unwrap();
        let repo = storage.interactions();

        let mut event = interaction("user_abcdef123456", EventType::Click, 1_748_779_200.5);
        event.session_id = Some("session_abcdef123456_1748779200".to_string());
        event.element = Some("hashtag-UWCL".to_string());
        event.x = Some(412.0);
        event.scroll_depth = Some(55.0);
        event.metadata = Some(json!({"timezone": "Europe/Brussels"}));

        repo.insert(&event).await.unwrap();

        let found = repo.recent_for_user("user_abcdef123456", 10).await.unwrap();
        assert_eq!(found.len(), 1);

        let stored = &found[0];
        assert_eq!(stored.user_id, event.user_id);
        assert_eq!(stored.event_type, EventType::Click);
        assert_eq!(stored.timestamp, 1_748_779_200.5);
        assert_eq!(stored.session_id, event.session_id);
        assert_eq!(stored.element.as_deref(), Some("hashtag-UWCL"));
        assert_eq!(stored.x, Some(412.0));
        assert_eq!(stored.y, None);
        assert_eq!(stored.scroll_depth, Some(55.0));
        assert_eq!(stored.metadata, event.metadata);
    }

    #[tokio::test]
    async fn test_recent_for_user_orders_newest_first() {
        let storage = Storage::new_memory().await.unwrap();
        let repo = storage.interactions();

        for i in 0..5 {
            repo.insert(&interaction(
                "user_abcdef123456",
                EventType::PageView,
                1_748_779_200.0 + i as f64,
            ))
            .await
            .unwrap();
        }
        // another user's events stay out of the result
        repo.insert(&interaction(
            "user_000000000000",
            EventType::PageView,
            1_748_779_300.0,
        ))
        .await
        .unwrap();

        let found = repo.recent_for_user("user_abcdef123456", 3).await.unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].timestamp, 1_748_779_204.0);
        assert_eq!(found[2].timestamp, 1_748_779_202.0);
    }

    #[tokio::test]
    async fn test_clicks_since_filters_type_and_time() {
        let storage = Storage::new_memory().await.unwrap();
        let repo = storage.interactions();

        repo.insert(&interaction(
            "user_abcdef123456",
            EventType::Click,
            1_000.0,
        ))
        .await
        .unwrap();
        repo.insert(&interaction(
            "user_abcdef123456",
            EventType::Click,
            5_000.0,
        ))
        .await
        .unwrap();
        repo.insert(&interaction(
            "user_abcdef123456",
            EventType::Hover,
            5_000.0,
        ))
        .await
        .unwrap();

        let clicks = repo.clicks_since(2_000.0).await.unwrap();
        assert_eq!(clicks.len(), 1);
        assert_eq!(clicks[0].timestamp, 5_000.0);
        assert_eq!(clicks[0].event_type, EventType::Click);
    }

    #[tokio::test]
    async fn test_group_counts() {
        let storage = Storage::new_memory().await.unwrap();
        let repo = storage.interactions();

        for _ in 0..3 {
            repo.insert(&interaction(
                "user_aaaaaaaaaaaa",
                EventType::Click,
                1_000.0,
            ))
            .await
            .unwrap();
        }
        repo.insert(&interaction(
            "user_bbbbbbbbbbbb",
            EventType::PageView,
            1_000.0,
        ))
        .await
        .unwrap();

        assert_eq!(repo.count().await.unwrap(), 4);

        let by_type = repo.count_by_event_type(10).await.unwrap();
        assert_eq!(by_type[0], ("click".to_string(), 3));
        assert_eq!(by_type[1], ("page_view".to_string(), 1));

        let top_users = repo.top_users(1).await.unwrap();
        assert_eq!(top_users, vec![("user_aaaaaaaaaaaa".to_string(), 3)]);
    }
}
