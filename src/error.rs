//! Error types for Folio.

use thiserror::Error;

/// Library-level error type for Folio operations.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Chat API error: {0}")]
    Chat(String),

    #[error("Tool error: {0}")]
    Tool(String),
}

/// Result type alias for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;
