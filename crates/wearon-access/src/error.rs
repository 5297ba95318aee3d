//! Access Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, AccessError>;

/// Errors from the billing/credit services
#[derive(Error, Debug)]
pub enum AccessError {
    /// Integration misconfiguration (missing capability, bad options)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure from the underlying API client
    #[error("Client error: {0}")]
    Client(#[from] wearon_core::ClientError),
}

impl AccessError {
    /// Check if this failure came from the remote endpoint
    ///
    /// Remote failures must be handled fail-closed by the caller; local
    /// configuration errors should abort initialization instead.
    pub fn is_remote(&self) -> bool {
        match self {
            AccessError::Client(inner) => inner.is_remote(),
            AccessError::Config(_) => false,
        }
    }
}
