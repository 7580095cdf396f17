//! Error types for drawing loading.

use thiserror::Error;

/// Errors that can occur while loading a drawing.
#[derive(Debug, Error)]
pub enum CadError {
    /// The drawing file could not be read
    #[error("Failed to read drawing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The drawing JSON is malformed
    #[error("Invalid drawing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CAD operations.
pub type Result<T> = std::result::Result<T, CadError>;
