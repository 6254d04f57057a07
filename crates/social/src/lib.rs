//! Social media mirror
//!
//! Pulls public Reddit posts about women's football into a time-limited
//! in-memory cache so the dashboard can show a social feed without hitting
//! the Reddit API on every page load.
//!
//! # Overview
//!
//! - [`RedditClient`] fetches top posts per configured subreddit plus a set
//!   of keyword searches, deduplicates them, and enriches each post with
//!   extracted hashtags and a naive sentiment label.
//! - [`FeedCache`] holds the last good fetch behind a TTL; expired data is
//!   dropped, never served stale.
//! - [`run_refresh_loop`] keeps the cache warm from a background task.
//!
//! The upstream is behind the [`SocialFeed`] trait so tests and the API
//! layer never depend on the network.

pub mod cache;
pub mod error;
pub mod post;
pub mod reddit;

pub use cache::FeedCache;
pub use error::{Result, SocialError};
pub use post::{Sentiment, SocialPost};
pub use reddit::{RedditClient, SocialFeed};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

/// Periodically refresh the cache from the upstream feed
///
/// Runs forever; fetch failures are logged and the previous cache contents
/// simply age out.
pub async fn run_refresh_loop(
    feed: Arc<dyn SocialFeed>,
    cache: Arc<FeedCache>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);

    loop {
        ticker.tick().await;

        match feed.fetch_posts().await {
            Ok(posts) => {
                debug!(count = posts.len(), "Refreshed social feed");
                cache.put(posts).await;
            }
            Err(e) => {
                warn!(error = %e, "Social feed refresh failed");
            }
        }
    }
}
