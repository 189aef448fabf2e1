//! Error types for songpack-fs

use thiserror::Error;

/// Main error type for the file server
#[derive(Error, Debug)]
pub enum Error {
    /// Config file loading errors
    #[error(transparent)]
    Config(#[from] songpack_common::Error),

    /// Credential is not a `user:pass` pair
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Configured value cannot be sent as an HTTP header
    #[error("Invalid value for {name}: {value:?}")]
    InvalidHeaderValue { name: &'static str, value: String },

    /// Served root is missing or not a directory
    #[error("Served root is not a directory: {0}")]
    RootNotDirectory(std::path::PathBuf),
}

/// Convenience Result type using songpack-fs Error
pub type Result<T> = std::result::Result<T, Error>;
