//! Error types for the parts of the engine that parse external input.

use thiserror::Error;

/// Result type for fallible canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors raised while parsing colors, brush names or configuration.
///
/// Drawing itself never fails: out-of-range writes and unresolved layers are
/// silent no-ops, and contract violations panic.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Unknown brush: {0}")]
    UnknownBrush(String),
    #[error("Unknown brush property: {0}")]
    UnknownProperty(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
