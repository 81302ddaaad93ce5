//! Error types for the catalogue client.

use cue_playback::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to the catalogue server.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Resource does not exist (unknown playlist or track)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid server URL
    #[error("Invalid catalogue URL: {0}")]
    InvalidUrl(String),

    /// Failed to decode server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Server is offline or unreachable
    #[error("Catalogue unreachable: {0}")]
    Unreachable(String),
}

impl CatalogueError {
    /// Classify a transport error
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            CatalogueError::Unreachable(error.to_string())
        } else if error.is_decode() {
            CatalogueError::Parse(error.to_string())
        } else {
            CatalogueError::Request(error)
        }
    }
}

impl From<CatalogueError> for GatewayError {
    fn from(error: CatalogueError) -> Self {
        match error {
            CatalogueError::Server { status, message } => GatewayError::Server { status, message },
            CatalogueError::NotFound(message) => GatewayError::Server {
                status: 404,
                message,
            },
            CatalogueError::Parse(message) => GatewayError::Parse(message),
            CatalogueError::Unreachable(message) => GatewayError::Unreachable(message),
            CatalogueError::InvalidUrl(message) => GatewayError::Unreachable(message),
            CatalogueError::Request(e) => GatewayError::Unreachable(e.to_string()),
        }
    }
}

/// Result type for catalogue client operations.
pub type Result<T> = std::result::Result<T, CatalogueError>;
