//! Administrative endpoints
//!
//! # Routes
//!
//! - `GET /api/admin/users` - Page through collected user records

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::state::AppState;

/// Hard ceiling on page size, regardless of what the caller asks for
pub const MAX_LIST_LIMIT: u32 = 100;

/// Administrative routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

// =============================================================================
// Request/Response types
// =============================================================================

/// User list query parameters
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Maximum results (default 50, clamped to 100)
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Records to skip
    #[serde(default)]
    pub skip: u32,
}

fn default_limit() -> u32 {
    50
}

/// One user in the listing
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub created_at: String,
    pub last_seen: String,
    pub total_interactions: i64,
    pub total_sessions: i64,
    pub fingerprint: Value,
}

/// Pagination envelope
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub skip: u32,
    pub has_more: bool,
}

/// User listing response
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub success: bool,
    pub users: Vec<UserSummary>,
    pub pagination: Pagination,
}

// =============================================================================
// Handlers
// =============================================================================

/// List collected users in storage order
///
/// GET /api/admin/users
async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>> {
    let limit = query.limit.min(MAX_LIST_LIMIT);

    let repo = state.storage.users();
    let users = repo.list(limit, query.skip).await?;
    let total = repo.count().await?;

    let users: Vec<UserSummary> = users
        .into_iter()
        .map(|user| UserSummary {
            user_id: user.user_id,
            created_at: user.created_at.to_rfc3339(),
            last_seen: user.last_seen.to_rfc3339(),
            total_interactions: user.total_interactions,
            total_sessions: user.total_sessions,
            fingerprint: user.fingerprint,
        })
        .collect();

    Ok(Json(ListUsersResponse {
        success: true,
        users,
        pagination: Pagination {
            total,
            limit,
            skip: query.skip,
            has_more: u64::from(query.skip) + u64::from(limit) < total,
        },
    }))
}
