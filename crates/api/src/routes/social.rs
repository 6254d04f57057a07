//! Social mirror endpoints
//!
//! # Routes
//!
//! - `GET /api/social/posts` - Cached social media posts
//!
//! Served from the TTL cache; a cold cache falls through to one synchronous
//! upstream fetch. When the mirror is disabled or the upstream is down with
//! nothing cached, the endpoint reports unavailable rather than empty.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::error;

use sideline_social::SocialPost;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Social mirror routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/posts", get(social_posts))
}

/// Social posts response
#[derive(Debug, Serialize)]
pub struct SocialPostsResponse {
    pub success: bool,
    pub count: usize,
    pub posts: Vec<SocialPost>,
}

/// Cached social media posts
///
/// GET /api/social/posts
async fn social_posts(State(state): State<AppState>) -> Result<Json<SocialPostsResponse>> {
    if let Some(posts) = state.social_cache.get().await {
        return Ok(respond(posts));
    }

    let feed = state
        .social_feed
        .as_ref()
        .ok_or_else(|| ApiError::Unavailable("social feed is disabled".to_string()))?;

    let posts = feed.fetch_posts().await.map_err(|e| {
        error!(error = %e, "Cold social fetch failed");
        ApiError::Unavailable("social feed is unavailable".to_string())
    })?;

    state.social_cache.put(posts.clone()).await;
    Ok(respond(posts))
}

fn respond(posts: Vec<SocialPost>) -> Json<SocialPostsResponse> {
    Json(SocialPostsResponse {
        success: true,
        count: posts.len(),
        posts,
    })
}
