//! Aggregation engine
//!
//! Reads the event store and user directory at request time and assembles
//! the ranked payloads. The engine owns no state beyond the storage handle;
//! it is a pure read-side view.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sideline_store::Storage;

use crate::error::Result;
use crate::rankings::{
    TOP_HOURS, TOP_INTERESTS, engagement_score, optimal_post_time, peak_hours, suggest_hashtags,
    top_clicked_elements, trending_topics,
};
use crate::types::{
    EventTypeCount, Recommendations, SiteStats, TrendingTopic, UserAnalytics, UserInteractionCount,
    UserReport,
};

/// How many recent events a per-user report is computed over
pub const RECENT_WINDOW: u32 = 100;

/// How many entries the trending ranking carries
const TRENDING_LIMIT: usize = 10;

/// How many entries the site-stats frequency rankings carry
const STATS_TOP_LIMIT: u32 = 10;

/// On-demand analytics over the event store
pub struct AnalyticsEngine {
    storage: Arc<Storage>,
}

impl AnalyticsEngine {
    /// Create a new engine over a storage handle
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Per-user analytics over the most recent events
    ///
    /// A user with no stored events gets an empty report, not an error —
    /// the identifier may be fresh or simply unknown.
    pub async fn user_report(&self, user_id: &str) -> Result<UserReport> {
        let recent = self
            .storage
            .interactions()
            .recent_for_user(user_id, RECENT_WINDOW)
            .await?;

        // keep the un-truncated ranking around: recommendations consider
        // every clicked element, not just the reported top five
        let all_clicked = top_clicked_elements(&recent, usize::MAX);
        let top_interests = all_clicked.iter().take(TOP_INTERESTS).cloned().collect();
        let peak = peak_hours(&recent, TOP_HOURS);

        Ok(UserReport {
            user_id: user_id.to_string(),
            analytics: UserAnalytics {
                total_interactions: recent.len() as u64,
                top_interests,
                peak_activity_hours: peak.clone(),
                engagement_score: engagement_score(recent.len()),
            },
            recommendations: Recommendations {
                suggested_hashtags: suggest_hashtags(&all_clicked),
                optimal_post_time: optimal_post_time(&peak),
            },
        })
    }

    /// Site-wide trending topics over the last 24 hours
    pub async fn trending(&self, now: DateTime<Utc>) -> Result<Vec<TrendingTopic>> {
        let cutoff = (now - Duration::days(1)).timestamp() as f64;
        let clicks = self.storage.interactions().clicks_since(cutoff).await?;

        Ok(trending_topics(&clicks, TRENDING_LIMIT))
    }

    /// Site-wide aggregate statistics
    pub async fn site_stats(&self, now: DateTime<Utc>) -> Result<SiteStats> {
        let users = self.storage.users();
        let interactions = self.storage.interactions();

        let total_users = users.count().await?;
        let total_interactions = interactions.count().await?;
        let total_sessions = self.storage.sessions().count().await?;
        let new_users = users.count_created_since(now - Duration::days(7)).await?;

        let avg_interactions_per_user = if total_users == 0 {
            0.0
        } else {
            total_interactions as f64 / total_users as f64
        };

        let top_event_types = interactions
            .count_by_event_type(STATS_TOP_LIMIT)
            .await?
            .into_iter()
            .map(|(event_type, count)| EventTypeCount { event_type, count })
            .collect();

        let top_users = interactions
            .top_users(STATS_TOP_LIMIT)
            .await?
            .into_iter()
            .map(|(user_id, interactions)| UserInteractionCount {
                user_id,
                interactions,
            })
            .collect();

        Ok(SiteStats {
            total_users,
            total_interactions,
            total_sessions,
            new_users_last_7_days: new_users,
            avg_interactions_per_user,
            top_event_types,
            top_users,
        })
    }
}
