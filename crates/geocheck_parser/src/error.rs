//! Error types for configuration and dataset loading.

use thiserror::Error;

/// Errors that can occur while loading configurations and datasets.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// CSV reading failed
    #[error("Failed to read CSV: {0}")]
    CsvError(#[from] csv::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The content parsed but does not describe a table
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;
