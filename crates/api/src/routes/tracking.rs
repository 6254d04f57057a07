//! Ingestion endpoints
//!
//! # Routes
//!
//! - `POST /api/track/event` - Submit a single tracking event
//! - `POST /api/track/batch` - Submit up to 100 events at once
//! - `POST /api/track/session/start` - Open a session
//! - `POST /api/track/session/end` - Close a session
//!
//! An accepted event always performs the same three steps: upsert the user
//! (fingerprint captured at first sight), append the canonical record, and
//! bump the counters. Counter and last-seen updates are best-effort; a
//! failure there is logged and never rejects an event that is already
//! stored.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use sideline_store::User;
use sideline_tracking::{Interaction, normalize_event, validate_event};

use crate::error::{ApiError, Result};
use crate::fingerprint;
use crate::state::AppState;

/// Hard cap on events per batch call; larger batches are rejected outright
pub const MAX_BATCH_SIZE: usize = 100;

/// Ingestion routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/event", post(track_event))
        .route("/batch", post(track_batch))
        .route("/session/start", post(start_session))
        .route("/session/end", post(end_session))
}

// =============================================================================
// Request/Response types
// =============================================================================

/// Single-event acceptance response
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub message: &'static str,
}

/// Batch submit request
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    /// Raw events, validated independently
    pub events: Vec<Value>,
}

/// Batch submit response
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    /// Events examined
    pub processed: usize,
    /// Events stored
    pub successful: usize,
    /// Events rejected or failed
    pub failed: usize,
    /// Rejection reasons, in input order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Session boundary request
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub user_id: String,
    pub session_id: String,
}

/// Session boundary response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a single tracking event
///
/// POST /api/track/event
async fn track_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<TrackResponse>)> {
    let now = state.clock.now_utc();

    validate_event(&payload, now)?;
    let event = normalize_event(&payload, now);

    ingest_one(&state, &headers, &event).await?;

    Ok((
        StatusCode::CREATED,
        Json(TrackResponse {
            success: true,
            message: "Event tracked successfully",
        }),
    ))
}

/// Submit a batch of tracking events
///
/// POST /api/track/batch
///
/// A batch over the cap is rejected whole. Within the cap, every event runs
/// the full single-event pipeline independently; one rejection never rolls
/// back the others.
async fn track_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<BatchRequest>,
) -> Result<(StatusCode, Json<BatchResponse>)> {
    if request.events.len() > MAX_BATCH_SIZE {
        return Err(ApiError::BadRequest(format!(
            "maximum {} events per batch",
            MAX_BATCH_SIZE
        )));
    }

    let now = state.clock.now_utc();

    let mut successful = 0;
    let mut failed = 0;
    let mut errors = Vec::new();

    for payload in &request.events {
        if let Err(reason) = validate_event(payload, now) {
            failed += 1;
            errors.push(reason.to_string());
            continue;
        }

        let event = normalize_event(payload, now);
        match ingest_one(&state, &headers, &event).await {
            Ok(()) => successful += 1,
            Err(e) => {
                // the event is lost but the rest of the batch proceeds
                warn!(user_id = %event.user_id, error = %e, "Batch event failed to store");
                failed += 1;
                errors.push("internal server error".to_string());
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(BatchResponse {
            success: true,
            processed: request.events.len(),
            successful,
            failed,
            errors: if errors.is_empty() {
                None
            } else {
                Some(errors)
            },
        }),
    ))
}

/// Open a session
///
/// POST /api/track/session/start
async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
    validate_identifiers(&request)?;

    let user = User::new(
        request.user_id.clone(),
        fingerprint::capture(&headers, None),
    );
    state.storage.users().ensure(&user).await?;

    let created = state
        .storage
        .sessions()
        .start(&request.user_id, &request.session_id)
        .await?;

    // a replayed start is absorbed without inflating the counter
    if created
        && let Err(e) = state
            .storage
            .users()
            .increment_sessions(&request.user_id)
            .await
    {
        warn!(user_id = %request.user_id, error = %e, "Failed to bump session counter");
    }

    touch_last_seen(&state, &request.user_id).await;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            success: true,
            message: "Session started",
            session_id: Some(request.session_id),
        }),
    ))
}

/// Close a session
///
/// POST /api/track/session/end
///
/// Ending a session that was never started is a success with no state
/// change.
async fn end_session(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>> {
    validate_identifiers(&request)?;

    state
        .storage
        .sessions()
        .end(&request.user_id, &request.session_id)
        .await?;

    touch_last_seen(&state, &request.user_id).await;

    Ok(Json(SessionResponse {
        success: true,
        message: "Session ended",
        session_id: None,
    }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Run the full ingestion pipeline for one validated, normalized event
async fn ingest_one(state: &AppState, headers: &HeaderMap, event: &Interaction) -> Result<()> {
    let fingerprint = fingerprint::capture(headers, event.metadata.as_ref());
    let user = User::new(event.user_id.clone(), fingerprint);
    state.storage.users().ensure(&user).await?;

    state.storage.interactions().insert(event).await?;

    touch_last_seen(state, &event.user_id).await;

    if let Err(e) = state
        .storage
        .users()
        .increment_interactions(&event.user_id)
        .await
    {
        warn!(user_id = %event.user_id, error = %e, "Failed to bump interaction counter");
    }

    Ok(())
}

/// Best-effort last-seen update; never blocks the critical path
async fn touch_last_seen(state: &AppState, user_id: &str) {
    if let Err(e) = state.storage.users().touch_last_seen(user_id).await {
        warn!(user_id, error = %e, "Failed to update last-seen");
    }
}

fn validate_identifiers(request: &SessionRequest) -> Result<()> {
    if !sideline_ident::is_valid_user_id(&request.user_id) {
        return Err(ApiError::BadRequest("invalid user_id format".to_string()));
    }
    if !sideline_ident::is_valid_session_id(&request.session_id) {
        return Err(ApiError::BadRequest(
            "invalid session_id format".to_string(),
        ));
    }
    Ok(())
}
