//! Configuration for the songpack file server
//!
//! Settings are resolved in priority order:
//! 1. Command-line arguments
//! 2. Environment variables (via clap `env`)
//! 3. TOML config file (`--config`, else `~/.config/songpack/songpack-fs.toml`)
//! 4. Built-in defaults
//!
//! Built-in defaults reproduce the historical deployment: all interfaces,
//! port 8000, working directory, credential `admin:password`, origin
//! `http://localhost:8080`, realm `Test`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use songpack_common::config::{load_toml_file, locate_config_file};

use crate::credential::Credential;
use crate::error::Result;

/// Config file name looked up in the platform config directory
pub const CONFIG_FILE_NAME: &str = "songpack-fs.toml";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CREDENTIAL: &str = "admin:password";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_REALM: &str = "Test";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments for songpack-fs
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "songpack-fs")]
#[command(about = "Static file server for song packs with Basic auth and CORS")]
#[command(version)]
pub struct ServerArgs {
    /// TOML config file
    #[arg(short, long, env = "SONGPACK_FS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Interface to bind (default: all interfaces)
    #[arg(long, env = "SONGPACK_FS_HOST")]
    pub host: Option<String>,

    /// Port to listen on (default: 8000)
    #[arg(short, long, env = "SONGPACK_FS_PORT")]
    pub port: Option<u16>,

    /// Directory to serve (default: working directory)
    #[arg(short, long, env = "SONGPACK_FS_ROOT")]
    pub root: Option<PathBuf>,

    /// Shared `user:pass` secret; prefer the environment variable
    #[arg(long, env = "SONGPACK_CREDENTIAL", hide_env_values = true)]
    pub credential: Option<String>,

    /// Origin allowed by the CORS headers
    #[arg(long, env = "SONGPACK_FS_ORIGIN")]
    pub allowed_origin: Option<String>,

    /// Realm announced in WWW-Authenticate
    #[arg(long)]
    pub realm: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

/// Config file contents; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub credential: Option<String>,
    pub allowed_origin: Option<String>,
    pub realm: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub root: PathBuf,
    pub credential: Credential,
    /// True when no credential was configured and the built-in one is used
    pub uses_default_credential: bool,
    pub allowed_origin: String,
    pub realm: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl ServerConfig {
    /// Resolve from arguments, the config file they point at, and defaults
    pub fn resolve(args: &ServerArgs) -> Result<Self> {
        let toml = match locate_config_file(args.config.as_deref(), CONFIG_FILE_NAME) {
            Some(path) => load_toml_file(&path)?,
            None => TomlConfig::default(),
        };
        Self::from_sources(args, toml)
    }

    /// Merge already-loaded sources; arguments win over the file
    pub fn from_sources(args: &ServerArgs, toml: TomlConfig) -> Result<Self> {
        let secret = args.credential.clone().or(toml.credential);
        let uses_default_credential = secret.is_none();
        let credential = Credential::new(secret.as_deref().unwrap_or(DEFAULT_CREDENTIAL))?;

        Ok(Self {
            host: args
                .host
                .clone()
                .or(toml.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: args.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            root: args
                .root
                .clone()
                .or(toml.root)
                .unwrap_or_else(|| PathBuf::from(".")),
            credential,
            uses_default_credential,
            allowed_origin: args
                .allowed_origin
                .clone()
                .or(toml.allowed_origin)
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            realm: args
                .realm
                .clone()
                .or(toml.realm)
                .unwrap_or_else(|| DEFAULT_REALM.to_string()),
            request_timeout: Duration::from_secs(
                args.request_timeout_secs
                    .or(toml.request_timeout_secs)
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            log_level: toml
                .logging
                .level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    /// `host:port` for display; IPv6 hosts are bracketed
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Default tracing filter for this service
    pub fn log_filter(&self) -> String {
        format!("songpack_fs={0},tower_http={0}", self.log_level)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            credential: Credential::encode(DEFAULT_CREDENTIAL),
            uses_default_credential: true,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            realm: DEFAULT_REALM.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
