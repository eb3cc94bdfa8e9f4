//! Test context wiring a dialogue to an in-memory ledger

use std::sync::Arc;
use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};
use gedie::config::WebConfig;
use gedie::dialogue::{ExpenseDialogue, Reply};
use gedie::models::Category;
use gedie::services::{Ledger, ReceiptAnalyzer};
use gedie::state::ConversationStateStore;
use super::{MemoryLedger, StubAnalyzer};

pub const TEST_USER: i64 = 123_456_789;
pub const OTHER_USER: i64 = 987_654_321;

pub struct TestContext {
    pub store: Arc<ConversationStateStore>,
    pub ledger: Arc<MemoryLedger>,
    pub dialogue: ExpenseDialogue,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_web_config(WebConfig {
            dashboard_url: Some("https://gedie.example.com".to_string()),
            access_code_length: 6,
        })
    }

    pub fn with_web_config(web: WebConfig) -> Self {
        let store = Arc::new(ConversationStateStore::new());
        let ledger = Arc::new(MemoryLedger::new());
        let dialogue = ExpenseDialogue::new(
            Arc::clone(&store),
            Arc::clone(&ledger) as Arc<dyn Ledger>,
            web,
        );
        Self { store, ledger, dialogue }
    }

    /// Dialogue that reads photos with `analyzer`
    pub fn with_analyzer(analyzer: Arc<StubAnalyzer>) -> Self {
        let Self { store, ledger, dialogue } = Self::new();
        let dialogue = dialogue.with_receipt_analyzer(analyzer as Arc<dyn ReceiptAnalyzer>);
        Self { store, ledger, dialogue }
    }

    /// Run /start for `telegram_id` and return the user's categories
    pub async fn register(&self, telegram_id: i64) -> Vec<Category> {
        self.dialogue
            .on_start(telegram_id, "Maria")
            .await
            .expect("start should succeed");
        let user = self.ledger.find_user(telegram_id).await.unwrap().unwrap();
        self.ledger.categories_of(user.id)
    }

    pub async fn press(&self, telegram_id: i64, data: &str) -> Reply {
        self.dialogue
            .on_callback(telegram_id, data)
            .await
            .unwrap_or_else(|e| panic!("callback {} failed: {}", data, e))
    }

    pub async fn type_text(&self, telegram_id: i64, text: &str) -> Reply {
        self.dialogue
            .on_text(telegram_id, text)
            .await
            .unwrap_or_else(|e| panic!("text {:?} failed: {}", text, e))
    }
}

/// Callback payloads of every button in the keyboard, row by row
pub fn callback_data(keyboard: &InlineKeyboardMarkup) -> Vec<String> {
    keyboard
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|button| match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}

pub fn has_button(reply: &Reply, data: &str) -> bool {
    reply
        .keyboard
        .as_ref()
        .map(|keyboard| callback_data(keyboard).iter().any(|d| d == data))
        .unwrap_or(false)
}
