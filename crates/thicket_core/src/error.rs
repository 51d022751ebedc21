//! Error types for the core library

use thiserror::Error;

/// The core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Handle is null
    #[error("Handle is null")]
    NullHandle,
    /// Handle is stale (generation mismatch)
    #[error("Handle is stale (already freed)")]
    StaleHandle,
}

/// Result type alias
pub type Result<T> = core::result::Result<T, CoreError>;
