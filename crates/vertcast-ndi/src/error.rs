//! Error types for the vertical output controller.
//!
//! All of these are handled locally: the controller logs them and folds them
//! into `last_error()` / `is_running()` rather than propagating them to the
//! caller.

/// Result type alias for vertical output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Failures surfaced by the host output API or the lifecycle controller.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The host refused to create the output instance
    #[error("failed to create output: {0}")]
    CreateFailed(String),

    /// A lifecycle operation ran before `init()` created an output
    #[error("output not initialized")]
    NotInitialized,

    /// The device was created but refused to start
    #[error("failed to start output: {0}")]
    StartFailed(String),
}

impl OutputError {
    /// Creates a creation failure with a custom message.
    pub fn create_failed(msg: impl Into<String>) -> Self {
        Self::CreateFailed(msg.into())
    }

    /// Creates a start failure with the device's reported error.
    pub fn start_failed(msg: impl Into<String>) -> Self {
        Self::StartFailed(msg.into())
    }
}
