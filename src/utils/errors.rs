//! Error handling for GEDIE
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the GEDIE application
#[derive(Error, Debug)]
pub enum GedieError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Telegram file download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for GEDIE operations
pub type Result<T> = std::result::Result<T, GedieError>;

impl GedieError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            GedieError::Database(_) => false,
            GedieError::Migration(_) => false,
            GedieError::Telegram(_) => true,
            GedieError::Download(_) => true,
            GedieError::Config(_) => false,
            GedieError::ConfigLoad(_) => false,
            GedieError::UserNotFound { .. } => false,
            GedieError::Serialization(_) => false,
            GedieError::InvalidInput(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GedieError::Database(_) => ErrorSeverity::Critical,
            GedieError::Migration(_) => ErrorSeverity::Critical,
            GedieError::Config(_) => ErrorSeverity::Critical,
            GedieError::ConfigLoad(_) => ErrorSeverity::Critical,
            GedieError::Serialization(_) => ErrorSeverity::Warning,
            GedieError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
