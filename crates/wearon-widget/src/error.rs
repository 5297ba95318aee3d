//! Widget Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, WidgetError>;

/// Errors from the widget controller and capture pipeline
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Integration misconfiguration (missing capability, no 2D context)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The video stream has no dimensions yet; retry once it stabilizes
    #[error("Video stream is not ready for capture")]
    CaptureNotReady,

    /// Capture requested while no camera session is active
    #[error("Camera is not active")]
    CameraInactive,

    /// Size recommendation input was unusable
    #[error("Invalid size recommendation: {0}")]
    InvalidSizeRec(String),

    /// Failure from the access/billing layer
    #[error("Access error: {0}")]
    Access(#[from] wearon_access::AccessError),

    /// Failure from a capability adapter
    #[error("Client error: {0}")]
    Client(#[from] wearon_core::ClientError),
}

impl WidgetError {
    /// Check if retrying after the stream stabilizes can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, WidgetError::CaptureNotReady)
    }
}
