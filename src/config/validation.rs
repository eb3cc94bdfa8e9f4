//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GedieError, Result};
use super::Settings;

/// Longest idle timeout accepted: 30 days
pub const MAX_IDLE_TIMEOUT_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_conversation_config(&settings.conversation)?;
    validate_web_config(&settings.web)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(GedieError::Config(
            "Bot token is required".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GedieError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(GedieError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GedieError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate conversation configuration
fn validate_conversation_config(config: &super::ConversationConfig) -> Result<()> {
    if config.idle_timeout_seconds == Some(0) {
        return Err(GedieError::Config(
            "Idle timeout must be greater than 0 when set".to_string()
        ));
    }

    if let Some(timeout) = config.idle_timeout_seconds {
        if timeout > MAX_IDLE_TIMEOUT_SECONDS {
            return Err(GedieError::Config(format!(
                "Idle timeout must be at most {} seconds, got {}",
                MAX_IDLE_TIMEOUT_SECONDS, timeout
            )));
        }
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(GedieError::Config(
            "Cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate web dashboard configuration
fn validate_web_config(config: &super::WebConfig) -> Result<()> {
    if !(4..=12).contains(&config.access_code_length) {
        return Err(GedieError::Config(
            format!("Access code length must be between 4 and 12, got {}", config.access_code_length)
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GedieError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GedieError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
