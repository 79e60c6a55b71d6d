//! Renderer error types.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Renderer configuration cannot produce a frame.
    #[error("Invalid renderer config: {0}")]
    InvalidConfig(String),

    /// Drawing surface rejected a call.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Output requested before any frame was presented.
    #[error("No frame has been presented")]
    NotPresented,

    /// Draw commands could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
