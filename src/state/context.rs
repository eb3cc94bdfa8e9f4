//! Conversation context types
//!
//! A user's position in the expense-entry dialogue (`ConversationState`) and
//! the fields gathered so far (`ConversationData`). Data is merged field by
//! field, so a partial update can never drop a value captured on an earlier
//! turn.

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::models::receipt::ReceiptAnalysis;

/// Step of the expense-registration dialogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    SelectingCategory,
    WaitingAmount,
    WaitingDescription,
    ConfirmingExpense,
}

impl ConversationState {
    /// Stable tag used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::SelectingCategory => "selecting_category",
            ConversationState::WaitingAmount => "waiting_amount",
            ConversationState::WaitingDescription => "waiting_description",
            ConversationState::ConfirmingExpense => "confirming_expense",
        }
    }

    /// Whether the next inbound message is expected to be free text.
    ///
    /// `SelectingCategory` is answered with a button, not text.
    pub fn expects_text_input(&self) -> bool {
        matches!(
            self,
            ConversationState::WaitingAmount | ConversationState::WaitingDescription
        )
    }
}

impl fmt::Display for ConversationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields accumulated during a dialogue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationData {
    pub category_id: Option<i64>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub photo_analysis: Option<ReceiptAnalysis>,
}

/// A single field update
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationField {
    CategoryId(i64),
    Amount(f64),
    Description(String),
    PhotoAnalysis(ReceiptAnalysis),
}

impl ConversationField {
    pub fn key(&self) -> &'static str {
        match self {
            ConversationField::CategoryId(_) => "category_id",
            ConversationField::Amount(_) => "amount",
            ConversationField::Description(_) => "description",
            ConversationField::PhotoAnalysis(_) => "photo_analysis",
        }
    }
}

impl ConversationData {
    pub fn with_category(category_id: i64) -> Self {
        Self {
            category_id: Some(category_id),
            ..Default::default()
        }
    }

    pub fn with_amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            ..Default::default()
        }
    }

    /// Merge `other` into `self`; set fields overwrite, unset fields are ignored
    pub fn merge(&mut self, other: ConversationData) {
        let ConversationData {
            category_id,
            amount,
            description,
            photo_analysis,
        } = other;

        if category_id.is_some() {
            self.category_id = category_id;
        }
        if amount.is_some() {
            self.amount = amount;
        }
        if description.is_some() {
            self.description = description;
        }
        if photo_analysis.is_some() {
            self.photo_analysis = photo_analysis;
        }
    }

    /// Set a single field, leaving the others untouched
    pub fn apply(&mut self, field: ConversationField) {
        match field {
            ConversationField::CategoryId(id) => self.category_id = Some(id),
            ConversationField::Amount(amount) => self.amount = Some(amount),
            ConversationField::Description(text) => self.description = Some(text),
            ConversationField::PhotoAnalysis(analysis) => self.photo_analysis = Some(analysis),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.photo_analysis.is_none()
    }
}

impl fmt::Display for ConversationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(id) = self.category_id {
            parts.push(format!("category_id: {}", id));
        }
        if let Some(amount) = self.amount {
            parts.push(format!("amount: {:.2}", amount));
        }
        if let Some(description) = &self.description {
            parts.push(format!("description: {:?}", description));
        }
        if let Some(analysis) = &self.photo_analysis {
            parts.push(format!(
                "photo_analysis: {{total: {:?}, merchant: {:?}}}",
                analysis.total_amount, analysis.merchant
            ));
        }
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// One user's conversation entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConversation {
    pub user_id: i64,
    pub state: ConversationState,
    pub data: ConversationData,
    pub updated_at: DateTime<Utc>,
}

impl UserConversation {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            state: ConversationState::Idle,
            data: ConversationData::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

impl fmt::Display for UserConversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.state, self.data)
    }
}
