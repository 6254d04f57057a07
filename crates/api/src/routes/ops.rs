//! Operations endpoints
//!
//! # Routes
//!
//! - `GET /` - Service banner
//! - `GET /health` - Liveness check, no auth

use axum::{Json, Router, routing::get};

use crate::state::AppState;

/// Operations routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Sideline Analytics API",
        "status": "running",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "healthy"}))
}
