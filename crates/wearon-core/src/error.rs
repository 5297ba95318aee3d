//! Client Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised by the capability adapters
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required capability is missing or misconfigured.
    ///
    /// This is an integration error, not something the shopper can recover
    /// from; it should abort initialization.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure from the HTTP client
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the storefront API
    #[error("HTTP status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// Response body could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Camera capability failed to produce a stream
    #[error("Camera error: {0}")]
    Camera(String),
}

impl ClientError {
    /// Check if this error came from the remote endpoint rather than
    /// the local integration
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Status { .. } | ClientError::Serialization(_)
        )
    }
}
