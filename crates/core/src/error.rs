//! Error types for the autotok libraries.

use crate::core::special::SpecialRole;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer facade and its backends.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// The wrapped model could not be loaded for this identifier
    #[error("{identifier} is not supported by HuggingFace. {reason}")]
    ModelLoad { identifier: String, reason: String },

    /// Error raised by the wrapped model while tokenizing or decoding
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// Error loading a vocabulary or model metadata
    #[error("Load error: {0}")]
    Load(String),

    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown token ID
    #[error("Unknown token ID: {0}")]
    UnknownTokenId(u32),

    /// Unknown token string and no unknown-token fallback
    #[error("Unknown token: {0}")]
    UnknownToken(String),

    /// A special-token role has no token assigned
    #[error("No {0} token is defined")]
    MissingSpecialToken(SpecialRole),
}

impl TokenizerError {
    /// Wrap any failure raised while loading `identifier`.
    pub fn model_load(identifier: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ModelLoad {
            identifier: identifier.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
