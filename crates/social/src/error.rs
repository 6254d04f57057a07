//! Social mirror error types

use thiserror::Error;

/// Social mirror errors
#[derive(Debug, Error)]
pub enum SocialError {
    /// HTTP client construction failed
    #[error("social client init: {0}")]
    Init(String),

    /// Request to the upstream failed outright
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),
}

/// Result type for social mirror operations
pub type Result<T> = std::result::Result<T, SocialError>;
