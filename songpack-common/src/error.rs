//! Common error types for songpack

use std::path::PathBuf;

use thiserror::Error;

/// Common result type for songpack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the songpack tools
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be read
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected schema
    #[error("Invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
