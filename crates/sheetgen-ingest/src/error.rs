//! Error types for worksheet sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`WorksheetSource`](crate::WorksheetSource).
#[derive(Debug, Error)]
pub enum SourceError {
    // === Run-fatal ===
    /// No usable client: missing or rejected credentials.
    #[error("authentication failed: {reason}")]
    Authentication { reason: String },

    /// The list of worksheets could not be retrieved.
    #[error("failed to enumerate worksheets: {reason}")]
    Enumeration { reason: String },

    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Per-sheet ===
    /// The named worksheet does not exist in the source.
    #[error("worksheet not found: {name}")]
    SheetNotFound { name: String },

    /// Rows of one worksheet could not be retrieved.
    #[error("failed to read worksheet {name}: {reason}")]
    SheetRead { name: String, reason: String },

    /// Failed to parse a CSV worksheet.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SourceError {
    /// True for errors that mean no client could be built.
    pub fn is_authentication(&self) -> bool {
        matches!(self, SourceError::Authentication { .. })
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
