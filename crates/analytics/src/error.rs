//! Aggregation error types

use thiserror::Error;

/// Aggregation errors
///
/// Any storage failure fails the whole aggregate request; partial results
/// are never returned as if complete.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Underlying storage read failed
    #[error("storage error: {0}")]
    Storage(#[from] sideline_store::StoreError),
}

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, AnalyticsError>;
