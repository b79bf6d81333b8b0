//! Error types for poi-gateway

use thiserror::Error;

/// Main error type for poi-gateway operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required query parameter was missing or not a number
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An upstream service returned a non-success status, timed out or was unreachable
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// An upstream service answered with a payload we could not decode
    #[error("Upstream returned malformed data: {0}")]
    UpstreamMalformed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// True for faults raised by an outbound call
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::UpstreamUnavailable(_) | Error::UpstreamMalformed(_)
        )
    }
}

/// Result type alias for poi-gateway operations
pub type Result<T> = std::result::Result<T, Error>;
