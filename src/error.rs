//! Error types for the curation workflow
//!
//! Every variant is recoverable: the controller turns it into status text and
//! leaves the workflow state valid.

use thiserror::Error;

/// Failures reported by tree lookups, workflow transitions and exports
#[derive(Error, Debug)]
pub enum CurationError {
    /// Playlist id missing from the index
    #[error("Playlist not found: {0}")]
    NotFound(String),

    /// Action requested outside its legal phase
    #[error("{0}")]
    PreconditionFailed(String),

    /// Provider returned no result where one was required
    #[error("{0}")]
    ProviderEmpty(String),

    /// Export sink failed mid-write
    #[error("Export failed: {0}")]
    Sink(#[from] std::io::Error),
}

impl CurationError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    pub fn provider_empty(message: impl Into<String>) -> Self {
        Self::ProviderEmpty(message.into())
    }
}

/// Convenience Result type using [`CurationError`]
pub type Result<T> = std::result::Result<T, CurationError>;
