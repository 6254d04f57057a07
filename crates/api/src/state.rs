//! Application state
//!
//! Shared state for API handlers. The storage handle, aggregation engine,
//! clock and social cache are all constructed by the process entry point
//! and injected here; handlers never reach for globals.

use std::sync::Arc;
use std::time::Duration;

use sideline_analytics::AnalyticsEngine;
use sideline_social::{FeedCache, SocialFeed};
use sideline_store::Storage;
use sideline_tracking::{Clock, SystemClock};

/// Default social cache TTL when none is configured
const DEFAULT_SOCIAL_TTL: Duration = Duration::from_secs(1800);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage handle
    pub storage: Arc<Storage>,
    /// Aggregation engine over the same storage
    pub analytics: Arc<AnalyticsEngine>,
    /// Time source for validation and trending windows
    pub clock: Arc<dyn Clock>,
    /// Cached social feed
    pub social_cache: Arc<FeedCache>,
    /// Upstream social feed; `None` when the mirror is disabled
    pub social_feed: Option<Arc<dyn SocialFeed>>,
}

impl AppState {
    /// Create application state over a storage handle
    ///
    /// Uses the system clock and an empty social cache with no upstream;
    /// the social endpoint reports unavailable until one is attached.
    pub fn new(storage: Arc<Storage>) -> Self {
        let analytics = Arc::new(AnalyticsEngine::new(Arc::clone(&storage)));

        Self {
            storage,
            analytics,
            clock: Arc::new(SystemClock),
            social_cache: Arc::new(FeedCache::new(DEFAULT_SOCIAL_TTL)),
            social_feed: None,
        }
    }

    /// Replace the time source (tests pin this)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Attach the social mirror
    pub fn with_social(mut self, feed: Arc<dyn SocialFeed>, cache: Arc<FeedCache>) -> Self {
        self.social_feed = Some(feed);
        self.social_cache = cache;
        self
    }
}
