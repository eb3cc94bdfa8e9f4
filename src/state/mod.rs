//! State management module
//! 
//! This module handles per-user conversation state for the expense dialogue

pub mod context;
pub mod storage;

// Re-export commonly used state components
pub use context::{ConversationState, ConversationData, ConversationField, UserConversation};
pub use storage::{ConversationStateStore, StateStorageManager, StorageStats};
