//! Error types for jot-core

use thiserror::Error;

/// Result type alias using jot-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in jot-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// The notes service answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never reached the service or the connection failed
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body did not match the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The service answered 204 where a note was required
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    /// The configured API base cannot form a request URL
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
