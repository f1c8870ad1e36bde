//! Error types for capture operations

use thiserror::Error;

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Errors that can occur while talking to the browser or producing an artifact
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Failed to launch a browser instance
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Failed to connect to an existing browser
    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    /// A tab-level operation failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation failed or did not complete
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// JavaScript evaluation in the page failed
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// The DOM snapshot could not be parsed
    #[error("Failed to parse DOM snapshot: {0}")]
    DomParseFailed(String),

    /// No element matched the requested selector
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// The privileged capture primitive reported an error; carries the raw message
    #[error("Viewport capture failed: {0}")]
    CaptureFailed(String),

    /// The capture primitive did not answer within the caller-imposed timeout
    #[error("Viewport capture timed out after {0}ms")]
    Timeout(u64),

    /// Coordinates could not be converted between logical and physical pixels
    #[error("Coordinate error: {0}")]
    Coordinate(String),

    /// A bitmap could not be decoded into a drawable surface
    #[error("Failed to decode bitmap: {0}")]
    DecodeFailed(String),

    /// A canvas could not be encoded as an image artifact
    #[error("Failed to encode bitmap: {0}")]
    EncodeFailed(String),

    /// A live node and its clone disagree on their element children
    #[error("Clone of <{tag}> has {clone} element children but the live node has {live}")]
    CloneMismatch { tag: String, live: usize, clone: usize },
}
