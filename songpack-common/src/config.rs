//! Configuration file location and loading
//!
//! Services resolve settings in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Priorities 1 and 2 are handled by each binary's clap arguments; this module
//! covers finding and parsing the TOML file.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result};

/// Directory name used under the platform config directory
pub const CONFIG_DIR_NAME: &str = "songpack";

/// Platform config file location for `file_name`
///
/// Linux: `~/.config/songpack/<file_name>`, falling back to
/// `/etc/songpack/<file_name>` when no user config directory is known.
pub fn default_config_path(file_name: &str) -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(file_name),
        None if cfg!(unix) => PathBuf::from("/etc").join(CONFIG_DIR_NAME).join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Pick the config file to load
///
/// An explicit path is always returned (a missing explicit file is an error
/// at load time). Otherwise the default location is used only if it exists.
pub fn locate_config_file(explicit: Option<&Path>, file_name: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let default_path = default_config_path(file_name);
    if default_path.is_file() {
        Some(default_path)
    } else {
        debug!("No config file at {}", default_path.display());
        None
    }
}

/// Parse a TOML file into `T`
pub fn load_toml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
