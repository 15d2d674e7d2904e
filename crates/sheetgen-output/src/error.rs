//! Error types for output generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing sheet outputs.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A sheet name cannot be used as a file name.
    #[error("sheet name {name:?} is not a valid file name")]
    InvalidFileName { name: String },

    /// Records could not be serialized.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
