use std::path::PathBuf;

use thiserror::Error;

/// Input-layer error. Raised by a document reader or by the orchestrator and
/// propagated to the caller unchanged; never converted into a field default.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    #[error("No text content could be extracted from {format} document")]
    EmptyContent { format: &'static str },

    #[error("{format} extraction error: {message}")]
    Document {
        format: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Configuration error. Fatal and never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found")]
    MissingCredential(&'static str),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
