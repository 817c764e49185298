//! Error types for snapshot retrieval.

use thiserror::Error;

/// Errors that can occur while listing or fetching snapshots.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid timeline response: {0}")]
    InvalidTimeline(#[from] serde_json::Error),
}

/// Result type for snapshot operations.
pub type Result<T> = std::result::Result<T, SnapshotError>;
