//! # songpack Common Library
//!
//! Shared code for the songpack tools:
//! - Common error type
//! - Tracing subscriber initialisation
//! - TOML configuration file loading

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
