//! Error types for switchboard

use thiserror::Error;

/// Result type alias using SwitchboardError
pub type Result<T> = std::result::Result<T, SwitchboardError>;

/// Error type alias for convenience
pub type Error = SwitchboardError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
    pub const CANCELLED: i32 = 4;
}

/// Main error type for switchboard
#[derive(Debug, Error)]
pub enum SwitchboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SwitchboardError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DocumentNotFound(_) => exit_codes::NOT_FOUND,
            Self::Config(_) => exit_codes::INVALID_INPUT,
            Self::Cancelled => exit_codes::CANCELLED,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
