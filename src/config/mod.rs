//! Configuration management for convbox
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use convbox::config::Config;
//!
//! let config = Config::load(None).expect("Failed to load configuration");
//! println!("Backend: {}", config.client.api_base_url);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `CONVBOX__<section>__<key>`
//!
//! Examples:
//! - `CONVBOX__CLIENT__API_BASE_URL=https://convert.example.com`
//! - `CONVBOX__CLIENT__MAX_UPLOAD_BYTES=250MB`
//! - `CONVBOX__DOWNLOADS__DIR=/tmp/converted`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/convbox.toml`.
//! This can be overridden using the `CONVBOX_CONFIG` environment variable
//! or an explicit path.

mod models;
mod sources;
mod validation;

// Re-export public types
pub use crate::humanize::ByteSize;
pub use models::{ClientConfig, Config, DownloadsConfig};
pub use sources::config_path;
pub use validation::{ValidationError, validate_tool};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables (`CONVBOX__*`)
    /// 2. TOML file (`path`, else `CONVBOX_CONFIG`, else `config/convbox.toml`)
    /// 3. Default values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - Validation fails (bad base URL, unsendable tool options, etc.)
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = sources::load(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
