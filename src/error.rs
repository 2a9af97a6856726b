//! Error types for userdir
//!
//! `FetchError` covers the single network read; `UserDirError` is what the
//! binary reports before exiting.

use thiserror::Error;

/// Failure of the startup fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode user list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Fetch task ended without a result")]
    Aborted,
}

impl FetchError {
    /// Short label for the kind of failure, shown under the error banner
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Client(_) | FetchError::Request { .. } => "network",
            FetchError::Status { .. } => "http",
            FetchError::Decode(_) => "decode",
            FetchError::Aborted => "aborted",
        }
    }
}

/// Main error type for userdir operations
#[derive(Error, Debug)]
pub enum UserDirError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No user with id {0}")]
    UserNotFound(i64),

    #[error("Failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Result type alias for userdir operations
pub type Result<T> = std::result::Result<T, UserDirError>;
