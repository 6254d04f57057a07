//! API routes
//!
//! Domain-grouped HTTP route handlers.

pub mod admin;
pub mod analytics;
pub mod ops;
pub mod social;
pub mod tracking;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    build_router_with_cors(state, &[])
}

/// Build the complete API router with a CORS allow-list
pub fn build_router_with_cors(state: AppState, cors_origins: &[String]) -> Router {
    let router = Router::new()
        // Operations routes (index, health - no prefix)
        .merge(ops::routes())
        // Ingestion routes
        .nest("/api/track", tracking::routes())
        // Analytics read routes
        .nest("/api/analytics", analytics::routes())
        // Administrative routes
        .nest("/api/admin", admin::routes())
        // Social mirror routes
        .nest("/api/social", social::routes());

    let router = if cors_origins.is_empty() {
        router
    } else {
        router.layer(cors_layer(cors_origins))
    };

    router.with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
