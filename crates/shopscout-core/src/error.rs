//! Error types for shopscout

use thiserror::Error;

/// Result type alias using ShopScoutError
pub type Result<T> = std::result::Result<T, ShopScoutError>;

/// Error type alias for convenience
pub type Error = ShopScoutError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const RETRIEVAL_FAILURE: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for shopscout
#[derive(Debug, Error)]
pub enum ShopScoutError {
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

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl ShopScoutError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Backend(_) | Self::Http(_) | Self::ExternalService(_) => {
                exit_codes::RETRIEVAL_FAILURE
            }
            Self::Config(_) | Self::InvalidInput(_) => exit_codes::INVALID_INPUT,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// True for errors that indicate configuration drift rather than a
    /// transient failure. Retrying these cannot succeed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. } | Self::Config(_))
    }
}
