//! Error types for directory-client.

use thiserror::Error;

/// Errors that can occur when talking to the remote directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP request failed (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The directory answered with an unexpected status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
