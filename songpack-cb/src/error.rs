//! Error types for the catalog builder

use std::path::PathBuf;

use thiserror::Error;

/// Catalog builder errors
///
/// Every variant is fatal for the run; there are no retries.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Root folder does not exist
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// Root exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failed
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading or writing a specific path failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed
    #[error("JSON error on {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience Result type for the catalog builder
pub type Result<T> = std::result::Result<T, CatalogError>;
