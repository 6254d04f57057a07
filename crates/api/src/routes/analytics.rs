//! Analytics read endpoints
//!
//! # Routes
//!
//! - `GET /api/analytics/user/{user_id}` - Per-user activity report
//! - `GET /api/analytics/trending` - Site-wide trending topics (24h)
//! - `GET /api/analytics/stats` - Site-wide aggregate statistics
//!
//! Everything is computed from the store at request time. A storage failure
//! fails the whole request; no partial payloads.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use serde::Serialize;

use sideline_analytics::{Recommendations, SiteStats, TrendingTopic, UserAnalytics};

use crate::error::Result;
use crate::state::AppState;

/// Analytics routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/{user_id}", get(user_analytics))
        .route("/trending", get(trending))
        .route("/stats", get(site_stats))
}

// =============================================================================
// Response types
// =============================================================================

/// Per-user analytics response
#[derive(Debug, Serialize)]
pub struct UserAnalyticsResponse {
    pub success: bool,
    pub user_id: String,
    pub analytics: UserAnalytics,
    pub recommendations: Recommendations,
}

/// Trending response
#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub success: bool,
    pub trending: Vec<TrendingTopic>,
}

/// Site stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: SiteStats,
}

// =============================================================================
// Handlers
// =============================================================================

/// Per-user activity report
///
/// GET /api/analytics/user/{user_id}
///
/// An unknown identifier yields an empty report rather than a 404; the
/// caller cannot tell a brand-new user from a nonexistent one, and does not
/// need to.
async fn user_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserAnalyticsResponse>> {
    let report = state.analytics.user_report(&user_id).await?;

    Ok(Json(UserAnalyticsResponse {
        success: true,
        user_id: report.user_id,
        analytics: report.analytics,
        recommendations: report.recommendations,
    }))
}

/// Site-wide trending topics over the last 24 hours
///
/// GET /api/analytics/trending
async fn trending(State(state): State<AppState>) -> Result<Json<TrendingResponse>> {
    let now = state.clock.now_utc();
    let trending = state.analytics.trending(now).await?;

    Ok(Json(TrendingResponse {
        success: true,
        trending,
    }))
}

/// Site-wide aggregate statistics
///
/// GET /api/analytics/stats
async fn site_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let now = state.clock.now_utc();
    let stats = state.analytics.site_stats(now).await?;

    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
