//! Configuration management for the carnet binary.
//!
//! This module handles loading and validating configuration from environment
//! variables, with an optional `.env` file read through `dotenvy`.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the persisted contacts document
    pub file: PathBuf,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CARNET_FILE`: path of the contacts JSON document
    ///
    /// Optional environment variables:
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let file = env::var("CARNET_FILE")
            .map_err(|_| ConfigError::MissingVar("CARNET_FILE".to_string()))?;

        if file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "CARNET_FILE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            file: PathBuf::from(file),
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            file: PathBuf::new(),
            log_level: "info".to_string(),
        }
    }
}
