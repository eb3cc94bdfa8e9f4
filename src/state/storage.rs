//! In-memory conversation state storage
//!
//! This module keeps every user's conversation entry in a single map behind a
//! mutex. All operations are O(1) and never block on I/O, so holding the lock
//! for the whole read-merge-write makes each operation atomic per user.
//! Entries are created lazily by writes and removed only by `clear_state` or,
//! when an idle timeout is configured, by expiry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use crate::config::ConversationConfig;
use crate::utils::logging::log_state_transition;
use super::context::{ConversationData, ConversationField, ConversationState, UserConversation};

/// Per-user conversation state store
#[derive(Default)]
pub struct ConversationStateStore {
    conversations: Mutex<HashMap<i64, UserConversation>>,
    idle_timeout: Option<chrono::Duration>,
}

impl ConversationStateStore {
    /// Create a store whose entries never expire
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that forgets conversations idle for longer than `timeout`
    pub fn with_idle_timeout(timeout: Duration) -> Self {
        Self {
            conversations: Mutex::new(HashMap::new()),
            idle_timeout: chrono::Duration::from_std(timeout).ok(),
        }
    }

    /// Create a store from configuration
    pub fn from_config(config: &ConversationConfig) -> Self {
        match config.idle_timeout_seconds {
            Some(seconds) => Self::with_idle_timeout(Duration::from_secs(seconds)),
            None => Self::new(),
        }
    }

    /// Move the user to `new_state`, merging `partial` into the data gathered so far
    pub fn set_state(&self, user_id: i64, new_state: ConversationState, partial: ConversationData) {
        let now = Utc::now();
        let mut conversations = self.lock();
        let conversation = self.live_entry(&mut conversations, user_id, now);

        let previous = conversation.state;
        conversation.data.merge(partial);
        conversation.state = new_state;
        conversation.touch(now);

        log_state_transition(user_id, previous.as_str(), new_state.as_str());
        debug!(user_id = user_id, data = %conversation.data, "Conversation data after transition");
    }

    /// Current state, `Idle` for unknown users
    pub fn get_state(&self, user_id: i64) -> ConversationState {
        let now = Utc::now();
        self.lock()
            .get(&user_id)
            .filter(|conversation| !self.is_expired(conversation, now))
            .map(|conversation| conversation.state)
            .unwrap_or_default()
    }

    /// Copy of the data gathered so far, empty for unknown users
    pub fn get_data(&self, user_id: i64) -> ConversationData {
        let now = Utc::now();
        self.lock()
            .get(&user_id)
            .filter(|conversation| !self.is_expired(conversation, now))
            .map(|conversation| conversation.data.clone())
            .unwrap_or_default()
    }

    /// Set one field without touching the state or the other fields
    pub fn update_data(&self, user_id: i64, field: ConversationField) {
        let now = Utc::now();
        let mut conversations = self.lock();
        let conversation = self.live_entry(&mut conversations, user_id, now);

        let key = field.key();
        conversation.data.apply(field);
        conversation.touch(now);

        debug!(user_id = user_id, key = key, data = %conversation.data, "Conversation data updated");
    }

    /// Drop the user's conversation entirely
    pub fn clear_state(&self, user_id: i64) {
        let removed = self.lock().remove(&user_id);
        if removed.is_some() {
            debug!(user_id = user_id, "Conversation cleared");
        } else {
            debug!(user_id = user_id, "No conversation to clear");
        }
    }

    /// Whether the next message from the user should be read as free-text input
    pub fn is_waiting_input(&self, user_id: i64) -> bool {
        self.get_state(user_id).expects_text_input()
    }

    /// Human-readable summary of every active conversation
    pub fn list_all_states(&self) -> HashMap<i64, String> {
        let now = Utc::now();
        self.lock()
            .iter()
            .filter(|(_, conversation)| !self.is_expired(conversation, now))
            .map(|(user_id, conversation)| (*user_id, conversation.to_string()))
            .collect()
    }

    /// Remove conversations that have been idle past the timeout
    pub fn purge_expired(&self) -> usize {
        if self.idle_timeout.is_none() {
            return 0;
        }

        let now = Utc::now();
        let mut conversations = self.lock();
        let before = conversations.len();
        conversations.retain(|_, conversation| !self.is_expired(conversation, now));
        let removed = before - conversations.len();

        if removed > 0 {
            info!("Purged {} idle conversations", removed);
        }
        removed
    }

    /// Count of active conversations, grouped by state
    pub fn stats(&self) -> StorageStats {
        let now = Utc::now();
        let conversations = self.lock();
        let mut by_state = HashMap::new();
        let mut total = 0;

        for conversation in conversations.values() {
            if self.is_expired(conversation, now) {
                continue;
            }
            total += 1;
            *by_state.entry(conversation.state).or_insert(0) += 1;
        }

        StorageStats { total, by_state }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, UserConversation>> {
        // Critical sections never leave the map half-updated
        self.conversations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Entry for `user_id`, created fresh when absent or expired
    fn live_entry<'a>(
        &self,
        conversations: &'a mut HashMap<i64, UserConversation>,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> &'a mut UserConversation {
        let conversation = conversations
            .entry(user_id)
            .or_insert_with(|| UserConversation::new(user_id));

        if self.is_expired(conversation, now) {
            debug!(user_id = user_id, "Conversation expired, starting fresh");
            *conversation = UserConversation::new(user_id);
        }
        conversation
    }

    fn is_expired(&self, conversation: &UserConversation, now: DateTime<Utc>) -> bool {
        match self.idle_timeout {
            Some(timeout) => now - conversation.updated_at > timeout,
            None => false,
        }
    }
}

impl std::fmt::Debug for ConversationStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationStateStore")
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

/// Storage statistics
#[derive(Debug, Clone, Default)]
pub struct StorageStats {
    pub total: usize,
    pub by_state: HashMap<ConversationState, usize>,
}

/// Runs periodic expiry of idle conversations
#[derive(Debug)]
pub struct StateStorageManager {
    storage: Arc<ConversationStateStore>,
    cleanup_interval: Duration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl StateStorageManager {
    pub fn new(storage: Arc<ConversationStateStore>, cleanup_interval: Duration) -> Self {
        Self {
            storage,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start the cleanup task. Must be called from within a tokio runtime.
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let storage = Arc::clone(&self.storage);
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;
                let count = storage.purge_expired();
                if count > 0 {
                    info!("Cleanup task removed {} idle conversations", count);
                }
                let stats = storage.stats();
                debug!(active = stats.total, by_state = ?stats.by_state, "Conversation store after cleanup");
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started conversation cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop the cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped conversation cleanup task");
        }
    }

    pub fn is_running(&self) -> bool {
        self.cleanup_handle.is_some()
    }
}

impl Drop for StateStorageManager {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
