//! Analytics result payloads

use serde::Serialize;

/// Click count for a single UI element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterestCount {
    /// Element identifier
    pub element: String,
    /// Click events counted in the window
    pub clicks: u64,
}

/// Activity count for one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourActivity {
    /// Hour of day, 0-23 (UTC)
    pub hour: u32,
    /// Events counted in that hour
    pub interactions: u64,
}

/// Content recommendations derived from click history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    /// Up to five topics: the user's own clicked hashtags first, padded
    /// from the default topic list
    pub suggested_hashtags: Vec<String>,
    /// Most active hour formatted `HH:00`, or the `09:00` fallback
    pub optimal_post_time: String,
}

/// Per-user activity summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAnalytics {
    /// Events in the analyzed window (most recent 100)
    pub total_interactions: u64,
    /// Top five clicked elements
    pub top_interests: Vec<InterestCount>,
    /// Top three active hours
    pub peak_activity_hours: Vec<HourActivity>,
    /// Interaction-volume proxy: window size x 10
    pub engagement_score: u64,
}

/// Full per-user analytics report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReport {
    /// The analyzed user
    pub user_id: String,
    /// Activity summary
    pub analytics: UserAnalytics,
    /// Derived recommendations
    pub recommendations: Recommendations,
}

/// One entry in the site-wide trending ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendingTopic {
    /// Topic name with the `hashtag-` prefix stripped
    pub hashtag: String,
    /// Clicks in the last 24 hours
    pub clicks: u64,
    /// Derived score: clicks x 100
    pub trending_score: u64,
}

/// Event-type frequency entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventTypeCount {
    pub event_type: String,
    pub count: u64,
}

/// Per-user interaction-record count entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInteractionCount {
    pub user_id: String,
    pub interactions: u64,
}

/// Site-wide aggregate statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteStats {
    /// Users ever seen
    pub total_users: u64,
    /// Interaction records ever stored
    pub total_interactions: u64,
    /// Sessions ever started
    pub total_sessions: u64,
    /// Users created in the last seven days
    pub new_users_last_7_days: u64,
    /// Mean stored interactions per user; 0 when there are no users
    pub avg_interactions_per_user: f64,
    /// Top ten event types by all-time frequency
    pub top_event_types: Vec<EventTypeCount>,
    /// Top ten users by stored interaction records
    pub top_users: Vec<UserInteractionCount>,
}
