//! Sideline Aggregation Engine
//!
//! On-demand analytics over the event store. Nothing here is materialized
//! or cached; every request reads the store's current contents and ranks
//! them in memory.
//!
//! # Overview
//!
//! - **Per-user reports**: top clicked elements, peak activity hours,
//!   engagement score, hashtag recommendations, suggested posting time —
//!   computed over the user's most recent 100 events.
//! - **Trending**: topic ranking over the last 24 hours of click events.
//! - **Site stats**: totals, growth and all-time frequency rankings.
//!
//! # Usage
//!
//! ```ignore
//! use sideline_analytics::AnalyticsEngine;
//!
//! let engine = AnalyticsEngine::new(storage);
//! let report = engine.user_report("user_abcdef123456").await?;
//! let trending = engine.trending(Utc::now()).await?;
//! ```
//!
//! Ranking ties are broken by first-encountered order in the underlying
//! scan (newest events first), which keeps results stable across calls when
//! nothing was written in between.

pub mod engine;
pub mod error;
pub mod rankings;
pub mod types;

#[cfg(test)]
mod rankings_test;

// Re-exports for convenience
pub use engine::{AnalyticsEngine, RECENT_WINDOW};
pub use error::{AnalyticsError, Result};
pub use rankings::{DEFAULT_TOPICS, TOPIC_PREFIX};
pub use types::{
    EventTypeCount, HourActivity, InterestCount, Recommendations, SiteStats, TrendingTopic,
    UserAnalytics, UserInteractionCount, UserReport,
};
