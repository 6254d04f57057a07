//! API error types
//!
//! Provides structured error responses for the HTTP API. Expected outcomes
//! (validation failure, not-found) carry their reason to the client; storage
//! faults are logged in full server-side and surfaced as a generic internal
//! failure, never leaking detail.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("{0}")]
    BadRequest(String),

    /// Event payload failed validation
    #[error(transparent)]
    Validation(#[from] sideline_tracking::ValidationError),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Dependent feature is not ready or not configured
    #[error("{0}")]
    Unavailable(String),

    /// Storage fault
    #[error(transparent)]
    Storage(#[from] sideline_store::StoreError),

    /// Aggregation fault
    #[error(transparent)]
    Analytics(#[from] sideline_analytics::AnalyticsError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Analytics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error class hides its detail from the client
    fn is_internal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Analytics(_))
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false` on the error path
    pub success: bool,
    /// Human-readable reason
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if self.is_internal() {
            // full detail stays in the server log
            tracing::error!(error = %self, "Internal failure");
            "internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        let body = ErrorResponse {
            success: false,
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
