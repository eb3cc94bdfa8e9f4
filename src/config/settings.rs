//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Conversation state configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversationConfig {
    /// Abandoned conversations are dropped after this many idle seconds.
    /// `None` keeps them until explicitly cleared.
    pub idle_timeout_seconds: Option<u64>,
    pub cleanup_interval_seconds: u64,
}

/// Web dashboard configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebConfig {
    pub dashboard_url: Option<String>,
    pub access_code_length: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
    pub json: bool,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: None,
            cleanup_interval_seconds: 300,
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            dashboard_url: None,
            access_code_length: 6,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_prefix: "gedie.log".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (optional) and `GEDIE__*` environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::from_file("config")
    }

    /// Load settings from the given file (extension optional) overlaid with the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = path.as_ref().to_string_lossy().into_owned();
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix("GEDIE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GedieError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/gedie".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            conversation: ConversationConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
