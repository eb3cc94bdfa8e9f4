//! GEDIE Telegram Bot
//!
//! Expense tracking over Telegram. Users register expenses through a short
//! button-driven dialogue (category, amount, optional description), confirm
//! receipt readings and list what they spent today, this week or this month.
//! The in-progress dialogue of every user lives in `state::ConversationStateStore`.

pub mod config;
pub mod dialogue;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GedieError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use dialogue::{ExpenseDialogue, Reply};
pub use services::Ledger;
pub use state::{ConversationStateStore, StateStorageManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
