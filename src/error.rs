//! Error types for dinorun.
//!
//! Everything here is a startup failure. The per-frame core has no error
//! paths once the catalog, config and collaborators exist.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for dinorun operations
#[derive(Debug, Error)]
pub enum DinoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Usage error: {0}")]
    Usage(String),
}

/// Catalog loading failures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing sprite '{name}' (expected {})", path.display())]
    MissingSprite { name: String, path: PathBuf },

    #[error("sprite '{name}' is empty")]
    EmptySprite { name: String },

    #[error("could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing sound '{name}' (expected {})", path.display())]
    MissingSound { name: String, path: PathBuf },
}

/// Result type alias for dinorun operations
pub type Result<T> = std::result::Result<T, DinoError>;

impl From<serde_json::Error> for DinoError {
    fn from(err: serde_json::Error) -> Self {
        DinoError::Config(err.to_string())
    }
}
