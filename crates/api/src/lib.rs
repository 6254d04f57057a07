//! Sideline API
//!
//! HTTP layer for the analytics service. Built on Axum; every handler works
//! against the shared [`AppState`] and returns structured success/failure
//! JSON.
//!
//! # Usage
//!
//! ```ignore
//! use sideline_api::{AppState, build_router};
//!
//! let storage = Arc::new(Storage::open("data/sideline.db").await?);
//! let state = AppState::new(storage);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5001").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Endpoints
//!
//! ## Ingestion
//! - `POST /api/track/event` - Single tracking event
//! - `POST /api/track/batch` - Up to 100 events per call
//! - `POST /api/track/session/start` - Open a session
//! - `POST /api/track/session/end` - Close a session
//!
//! ## Analytics
//! - `GET /api/analytics/user/{user_id}` - Per-user report
//! - `GET /api/analytics/trending` - Trending topics (24h)
//! - `GET /api/analytics/stats` - Site-wide statistics
//!
//! ## Administration
//! - `GET /api/admin/users` - User listing with pagination
//!
//! ## Social
//! - `GET /api/social/posts` - Cached social media feed
//!
//! ## Operations
//! - `GET /` - Service banner
//! - `GET /health` - Liveness check

pub mod error;
pub mod fingerprint;
pub mod routes;
pub mod state;

// Re-exports
pub use error::{ApiError, Result};
pub use routes::{build_router, build_router_with_cors};
pub use state::AppState;
