//! TTL cache for the social feed
//!
//! Holds the last successful fetch. Reads past the TTL return nothing;
//! stale data is never served as fresh.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::post::SocialPost;

struct CachedFeed {
    posts: Vec<SocialPost>,
    fetched_at: Instant,
}

/// Time-limited cache holding the last good feed
pub struct FeedCache {
    inner: RwLock<Option<CachedFeed>>,
    ttl: Duration,
}

impl FeedCache {
    /// Create an empty cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: RwLock::new(None),
            ttl,
        }
    }

    /// Current cached posts, or `None` when empty or expired
    pub async fn get(&self) -> Option<Vec<SocialPost>> {
        let guard = self.inner.read().await;
        let cached = guard.as_ref()?;

        if cached.fetched_at.elapsed() > self.ttl {
            return None;
        }
        Some(cached.posts.clone())
    }

    /// Replace the cache contents, restarting the TTL
    pub async fn put(&self, posts: Vec<SocialPost>) {
        let mut guard = self.inner.write().await;
        *guard = Some(CachedFeed {
            posts,
            fetched_at: Instant::now(),
        });
    }

    /// Drop the cached feed
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }
}
