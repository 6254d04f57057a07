//! Reddit upstream client
//!
//! Pulls top posts per subreddit plus keyword searches from the public
//! Reddit JSON endpoints. No authentication; the only requirement upstream
//! imposes is a descriptive user agent.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use sideline_config::SocialConfig;
use tracing::{debug, warn};

use crate::error::{Result, SocialError};
use crate::post::{SocialPost, analyze_sentiment, extract_hashtags};

const REDDIT_BASE_URL: &str = "https://www.reddit.com";

/// Posts fetched per subreddit
const POSTS_PER_SUBREDDIT: u32 = 25;

/// Posts fetched per search term
const POSTS_PER_SEARCH: u32 = 20;

/// Upper bound on the merged feed
const MAX_FEED_SIZE: usize = 50;

/// Upstream source of social posts
///
/// The API layer and tests depend on this seam, not on the concrete client.
#[async_trait]
pub trait SocialFeed: Send + Sync {
    /// Fetch the current merged feed, newest-relevant first
    async fn fetch_posts(&self) -> Result<Vec<SocialPost>>;
}

/// Reddit client for the public JSON endpoints
pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
    subreddits: Vec<String>,
    search_terms: Vec<String>,
}

impl RedditClient {
    /// Create a client from the social config section
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client creation fails (e.g., TLS or proxy
    /// misconfiguration).
    pub fn new(config: &SocialConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| SocialError::Init(format!("reddit HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: REDDIT_BASE_URL.to_string(),
            subreddits: config.subreddits.clone(),
            search_terms: config.search_terms.clone(),
        })
    }

    /// Override the upstream base URL (tests point this at a local server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Top posts of the week for one subreddit
    async fn fetch_subreddit(&self, subreddit: &str) -> Result<Vec<SocialPost>> {
        let url = format!("{}/r/{}/top.json", self.base_url, subreddit);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("limit", POSTS_PER_SUBREDDIT.to_string()),
                ("t", "week".to_string()),
                ("raw_json", "1".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialError::UpstreamStatus(response.status().as_u16()));
        }

        let listing: Listing = response.json().await?;
        Ok(listing.into_posts())
    }

    /// Keyword search across all of Reddit
    async fn search(&self, query: &str) -> Result<Vec<SocialPost>> {
        let url = format!("{}/search.json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.to_string()),
                ("limit", POSTS_PER_SEARCH.to_string()),
                ("sort", "relevance".to_string()),
                ("t", "month".to_string()),
                ("raw_json", "1".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SocialError::UpstreamStatus(response.status().as_u16()));
        }

        let listing: Listing = response.json().await?;
        Ok(listing.into_posts())
    }
}

#[async_trait]
impl SocialFeed for RedditClient {
    async fn fetch_posts(&self) -> Result<Vec<SocialPost>> {
        let mut posts: Vec<SocialPost> = Vec::new();

        // One failing subreddit or search must not empty the whole feed;
        // partial fetches are logged and the rest proceeds.
        for subreddit in &self.subreddits {
            match self.fetch_subreddit(subreddit).await {
                Ok(fetched) => {
                    debug!(subreddit, count = fetched.len(), "Fetched subreddit");
                    posts.extend(fetched);
                }
                Err(e) => warn!(subreddit, error = %e, "Subreddit fetch failed"),
            }
        }

        for term in &self.search_terms {
            match self.search(term).await {
                Ok(fetched) => {
                    debug!(term, count = fetched.len(), "Fetched search");
                    posts.extend(fetched);
                }
                Err(e) => warn!(term, error = %e, "Search fetch failed"),
            }
        }

        dedup_by_id(&mut posts);
        posts.sort_by(|a, b| b.score.cmp(&a.score));
        posts.truncate(MAX_FEED_SIZE);

        Ok(posts)
    }
}

fn dedup_by_id(posts: &mut Vec<SocialPost>) {
    let mut seen = Vec::with_capacity(posts.len());
    posts.retain(|post| {
        if seen.contains(&post.id) {
            false
        } else {
            seen.push(post.id.clone());
            true
        }
    });
}

// =============================================================================
// Upstream JSON shapes
// =============================================================================

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
    #[serde(default)]
    author: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
}

impl Listing {
    fn into_posts(self) -> Vec<SocialPost> {
        self.data
            .children
            .into_iter()
            .map(|child| child.data.into_post())
            .collect()
    }
}

impl RawPost {
    fn into_post(self) -> SocialPost {
        let combined = format!("{} {}", self.title, self.selftext);
        let hashtags = extract_hashtags(&combined);
        let sentiment = analyze_sentiment(&combined, self.score);

        SocialPost {
            id: self.id,
            title: self.title,
            text: self.selftext,
            subreddit: self.subreddit,
            score: self.score,
            num_comments: self.num_comments,
            author: self.author,
            created_utc: self.created_utc,
            permalink: self.permalink,
            hashtags,
            sentiment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_parse_and_enrich() {
        let json = r#"{
            "data": {
                "children": [
                    {"data": {
                        "id": "abc",
                        "title": "Historic #UWCL final win",
                        "selftext": "What an amazing match",
                        "subreddit": "WomensSoccer",
                        "score": 512,
                        "num_comments": 40,
                        "author": "fan1",
                        "created_utc": 1748779200.0,
                        "permalink": "/r/WomensSoccer/comments/abc"
                    }}
                ]
            }
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();
        let posts = listing.into_posts();

        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.id, "abc");
        assert_eq!(post.subreddit, "WomensSoccer");
        assert!(post.hashtags.contains(&"UWCL".to_string()));
        assert_eq!(post.sentiment, crate::post::Sentiment::Positive);
    }

    #[test]
    fn test_listing_parse_tolerates_missing_fields() {
        let json = r#"{"data": {"children": [{"data": {"id": "x", "title": "t"}}]}}"#;
        let listing: Listing = serde_json::from_str(json).unwrap();
        let posts = listing.into_posts();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].score, 0);
        assert_eq!(posts[0].author, "");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let raw = |id: &str, score: i64| RawPost {
            id: id.to_string(),
            title: "t".to_string(),
            selftext: String::new(),
            subreddit: "s".to_string(),
            score,
            num_comments: 0,
            author: "a".to_string(),
            created_utc: 0.0,
            permalink: String::new(),
        };

        let mut posts: Vec<SocialPost> = vec![
            raw("one", 10).into_post(),
            raw("two", 20).into_post(),
            raw("one", 30).into_post(),
        ];
        dedup_by_id(&mut posts);

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].score, 10);
    }
}
