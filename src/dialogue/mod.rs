//! Expense dialogue
//!
//! `ExpenseDialogue` turns inbound events (commands, button presses, free
//! text, receipt analyses) into conversation-state transitions and replies.
//! It never talks to Telegram itself; the handlers send the returned `Reply`.
//!
//! ```text
//! Idle -> SelectingCategory -> WaitingAmount -> ConfirmingExpense -> Idle
//!                                                    |        ^
//!                                                    v        |
//!                                             WaitingDescription (persists)
//! ```

pub mod actions;
pub mod keyboards;
pub mod messages;

use std::sync::Arc;
use chrono::{Local, NaiveDate};
use teloxide::types::InlineKeyboardMarkup;
use tracing::{debug, info, warn};
use crate::config::WebConfig;
use crate::models::{Category, CreateExpenseRequest, Period, ReceiptAnalysis, User};
use crate::services::{Ledger, ReceiptAnalyzer};
use crate::state::{ConversationData, ConversationField, ConversationState, ConversationStateStore};
use crate::utils::errors::Result;
use crate::utils::helpers::{amount_to_cents, generate_access_code, parse_amount};
use crate::utils::logging::{log_expense_saved, log_user_action};

pub use actions::CallbackAction;

/// Text and optional inline keyboard to send back to the user
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    pub fn text(text: String) -> Self {
        Self { text, keyboard: None }
    }

    pub fn with_keyboard(text: String, keyboard: InlineKeyboardMarkup) -> Self {
        Self { text, keyboard: Some(keyboard) }
    }
}

pub struct ExpenseDialogue {
    store: Arc<ConversationStateStore>,
    ledger: Arc<dyn Ledger>,
    web: WebConfig,
    analyzer: Option<Arc<dyn ReceiptAnalyzer>>,
}

impl ExpenseDialogue {
    pub fn new(store: Arc<ConversationStateStore>, ledger: Arc<dyn Ledger>, web: WebConfig) -> Self {
        Self { store, ledger, web, analyzer: None }
    }

    /// Read receipt photos with `analyzer` instead of pointing users at manual entry
    pub fn with_receipt_analyzer(mut self, analyzer: Arc<dyn ReceiptAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn has_receipt_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }

    pub fn store(&self) -> &Arc<ConversationStateStore> {
        &self.store
    }

    /// `/start`: register the user if needed and show the main menu
    pub async fn on_start(&self, telegram_id: i64, name: &str) -> Result<Reply> {
        let user = self.ledger.get_or_create_user(telegram_id, name).await?;
        self.store.clear_state(telegram_id);
        log_user_action(telegram_id, "start", None);

        Ok(Reply::with_keyboard(messages::welcome(&user.name), keyboards::main_menu()))
    }

    pub fn on_help(&self) -> Reply {
        Reply::with_keyboard(messages::help(), keyboards::back_to_main())
    }

    /// `/cancel`, `expense:cancel` and `confirm:no`
    pub fn on_cancel(&self, telegram_id: i64) -> Reply {
        self.store.clear_state(telegram_id);
        log_user_action(telegram_id, "cancel", None);
        Reply::with_keyboard(messages::expense_cancelled(), keyboards::main_menu())
    }

    pub async fn on_callback(&self, telegram_id: i64, data: &str) -> Result<Reply> {
        let action = CallbackAction::parse(data);
        debug!(user_id = telegram_id, action = ?action, "Handling callback");

        match action {
            CallbackAction::MainMenu => {
                self.store.clear_state(telegram_id);
                Ok(Reply::with_keyboard(messages::main_menu(), keyboards::main_menu()))
            }
            CallbackAction::RegisterExpense => self.start_registration(telegram_id).await,
            CallbackAction::ViewMenu => Ok(Reply::with_keyboard(
                messages::period_selection(),
                keyboards::period_selection(),
            )),
            CallbackAction::ViewExpenses(period) => self.show_expenses(telegram_id, period).await,
            CallbackAction::ConfirmExpense => self.persist_expense(telegram_id).await,
            CallbackAction::CancelExpense => Ok(self.on_cancel(telegram_id)),
            CallbackAction::AddDescription => Ok(self.request_description(telegram_id)),
            CallbackAction::SelectCategory(category_id) => self.select_category(telegram_id, category_id).await,
            CallbackAction::CategoryMenu => Ok(Reply::with_keyboard(
                messages::category_menu(),
                keyboards::category_menu(),
            )),
            CallbackAction::ListCategories => self.list_categories(telegram_id).await,
            CallbackAction::PhotoGuide => Ok(Reply::with_keyboard(
                messages::photo_guide(),
                keyboards::photo_guide(),
            )),
            CallbackAction::ConfirmPhoto => self.persist_receipt(telegram_id).await,
            CallbackAction::CancelPhoto => {
                self.store.clear_state(telegram_id);
                Ok(Reply::with_keyboard(messages::photo_cancelled(), keyboards::main_menu()))
            }
            CallbackAction::SettingsMenu => self.settings_menu(telegram_id).await,
            CallbackAction::GenerateCode => self.issue_access_code(telegram_id, false).await,
            CallbackAction::RegenerateCode => self.issue_access_code(telegram_id, true).await,
            CallbackAction::ViewCode => self.show_access_code(telegram_id).await,
            CallbackAction::ShowId => Ok(Reply::with_keyboard(
                messages::telegram_id(telegram_id),
                keyboards::back_to_main(),
            )),
            CallbackAction::WebHelp => Ok(Reply::with_keyboard(
                messages::web_help(self.web.dashboard_url.as_deref()),
                keyboards::back_to_settings(),
            )),
            CallbackAction::Unknown(data) => {
                warn!(user_id = telegram_id, callback_data = %data, "Unrecognised callback data");
                Ok(Reply::with_keyboard(messages::unknown_action(), keyboards::back_to_main()))
            }
        }
    }

    /// Free text: only meaningful while an amount or description is expected
    pub async fn on_text(&self, telegram_id: i64, text: &str) -> Result<Reply> {
        if !self.store.is_waiting_input(telegram_id) {
            return Ok(Reply::with_keyboard(messages::use_buttons(), keyboards::main_menu()));
        }

        match self.store.get_state(telegram_id) {
            ConversationState::WaitingAmount => self.receive_amount(telegram_id, text).await,
            ConversationState::WaitingDescription => self.receive_description(telegram_id, text).await,
            other => {
                warn!(user_id = telegram_id, state = %other, "Text input in unexpected state");
                Ok(Reply::with_keyboard(messages::use_buttons(), keyboards::main_menu()))
            }
        }
    }

    /// A receipt read by the vision service; asks the user to confirm it
    pub async fn on_receipt_analysis(&self, telegram_id: i64, analysis: ReceiptAnalysis) -> Result<Reply> {
        if let Some(reason) = analysis.error.as_deref() {
            warn!(user_id = telegram_id, reason = reason, "Receipt could not be analysed");
            return Ok(Reply::with_keyboard(messages::receipt_unreadable(reason), keyboards::photo_guide()));
        }

        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let categories = self.ledger.list_categories(user.id).await?;
        let category = suggest_category(&analysis, &categories);

        // A receipt starts a fresh expense; nothing from an earlier manual entry carries over
        self.store.clear_state(telegram_id);
        self.store.set_state(telegram_id, ConversationState::ConfirmingExpense, ConversationData {
            category_id: category.map(|category| category.id),
            photo_analysis: Some(analysis.clone()),
            ..Default::default()
        });

        log_user_action(telegram_id, "receipt_analysed", analysis.merchant.as_deref());
        Ok(Reply::with_keyboard(
            messages::receipt_analysis(&analysis, category),
            keyboards::photo_confirmation(),
        ))
    }

    /// A receipt photo; read by the analyzer when one is configured
    pub async fn on_photo(&self, telegram_id: i64, image: &[u8]) -> Result<Reply> {
        let Some(analyzer) = &self.analyzer else {
            return Ok(self.on_photo_without_analyzer(telegram_id));
        };

        log_user_action(telegram_id, "photo_received", None);
        match analyzer.analyze(image).await {
            Ok(analysis) => self.on_receipt_analysis(telegram_id, analysis).await,
            Err(e) => {
                warn!(user_id = telegram_id, error = %e, "Receipt analyzer failed");
                Ok(Reply::with_keyboard(
                    messages::receipt_unreadable("Falha ao analisar a imagem"),
                    keyboards::photo_guide(),
                ))
            }
        }
    }

    /// A photo arrived but no receipt reader is configured
    pub fn on_photo_without_analyzer(&self, telegram_id: i64) -> Reply {
        log_user_action(telegram_id, "photo_unsupported", None);
        Reply::with_keyboard(messages::photo_unavailable(), keyboards::photo_guide())
    }

    async fn start_registration(&self, telegram_id: i64) -> Result<Reply> {
        self.store.clear_state(telegram_id);

        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let categories = self.ledger.list_categories(user.id).await?;
        if categories.is_empty() {
            return Ok(Reply::with_keyboard(messages::no_categories(), keyboards::back_to_main()));
        }

        self.store.set_state(telegram_id, ConversationState::SelectingCategory, ConversationData::default());
        Ok(Reply::with_keyboard(messages::select_category(), keyboards::category_grid(&categories)))
    }

    async fn select_category(&self, telegram_id: i64, category_id: i64) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let category = match self.ledger.find_category(category_id).await? {
            Some(category) if category.user_id == user.id && category.is_active => category,
            _ => {
                warn!(user_id = telegram_id, category_id = category_id, "Category not available to user");
                return Ok(Reply::with_keyboard(messages::category_not_found(), keyboards::main_menu()));
            }
        };

        self.store.set_state(
            telegram_id,
            ConversationState::WaitingAmount,
            ConversationData::with_category(category.id),
        );
        Ok(Reply::with_keyboard(messages::enter_amount(&category), keyboards::cancel_only()))
    }

    async fn receive_amount(&self, telegram_id: i64, text: &str) -> Result<Reply> {
        let Some(amount) = parse_amount(text) else {
            debug!(user_id = telegram_id, input = text, "Rejected amount input");
            return Ok(Reply::with_keyboard(messages::invalid_amount(), keyboards::cancel_only()));
        };

        let Some(category_id) = self.store.get_data(telegram_id).category_id else {
            return Ok(self.conversation_lost(telegram_id, "category_id missing while waiting for amount"));
        };

        let Some(category) = self.ledger.find_category(category_id).await? else {
            self.store.clear_state(telegram_id);
            return Ok(Reply::with_keyboard(messages::category_not_found(), keyboards::main_menu()));
        };

        self.store.update_data(telegram_id, ConversationField::Amount(amount));
        self.store.set_state(telegram_id, ConversationState::ConfirmingExpense, ConversationData::default());

        Ok(Reply::with_keyboard(
            messages::confirm_expense(amount, &category, None),
            keyboards::expense_confirmation(),
        ))
    }

    fn request_description(&self, telegram_id: i64) -> Reply {
        let data = self.store.get_data(telegram_id);
        if data.category_id.is_none() || data.amount.is_none() {
            return self.conversation_lost(telegram_id, "description requested without a pending expense");
        }

        self.store.set_state(telegram_id, ConversationState::WaitingDescription, ConversationData::default());
        Reply::with_keyboard(messages::enter_description(), keyboards::cancel_only())
    }

    async fn receive_description(&self, telegram_id: i64, text: &str) -> Result<Reply> {
        let description = text.trim();
        if !description.is_empty() {
            self.store.update_data(telegram_id, ConversationField::Description(description.to_string()));
        }
        self.persist_expense(telegram_id).await
    }

    /// Terminal transition of the manual flow
    async fn persist_expense(&self, telegram_id: i64) -> Result<Reply> {
        let data = self.store.get_data(telegram_id);
        let (Some(category_id), Some(amount)) = (data.category_id, data.amount) else {
            return Ok(self.conversation_lost(telegram_id, "confirmation without category or amount"));
        };

        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        self.save(&user, category_id, amount, data.description).await
    }

    /// Terminal transition of the receipt flow
    async fn persist_receipt(&self, telegram_id: i64) -> Result<Reply> {
        let data = self.store.get_data(telegram_id);
        let Some(analysis) = data.photo_analysis else {
            return Ok(self.conversation_lost(telegram_id, "receipt confirmation without analysis"));
        };
        let Some(amount) = analysis.usable_amount() else {
            return Ok(self.conversation_lost(telegram_id, "receipt without a usable total"));
        };

        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let suggested = match data.category_id {
            Some(category_id) => self.ledger.find_category(category_id).await?,
            None => None,
        };
        let category_id = match suggested {
            Some(category) if category.user_id == user.id && category.is_active => category.id,
            _ => match self.ledger.list_categories(user.id).await?.first() {
                Some(category) => category.id,
                None => {
                    self.store.clear_state(telegram_id);
                    return Ok(Reply::with_keyboard(messages::no_categories(), keyboards::main_menu()));
                }
            },
        };

        let description = format!("📷 {}", analysis.merchant.as_deref().unwrap_or("Comprovante"));
        self.save(&user, category_id, amount, Some(description)).await
    }

    async fn save(&self, user: &User, category_id: i64, amount: f64, description: Option<String>) -> Result<Reply> {
        let expense = self.ledger.create_expense(CreateExpenseRequest {
            user_id: user.id,
            category_id,
            amount_cents: amount_to_cents(amount),
            description,
            spent_on: today(),
        }).await?;

        self.store.clear_state(user.telegram_id);
        log_expense_saved(user.telegram_id, expense.id, expense.amount_cents, expense.category_id);

        let category = self.ledger.find_category(expense.category_id).await?;
        Ok(Reply::with_keyboard(
            messages::expense_saved(expense.amount_cents, category.as_ref(), expense.description.as_deref()),
            keyboards::main_menu(),
        ))
    }

    async fn show_expenses(&self, telegram_id: i64, period: Period) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let (from, to) = period.range(today());
        let expenses = self.ledger.list_expenses(user.id, from, to).await?;
        log_user_action(telegram_id, "view_expenses", Some(period.as_str()));

        Ok(Reply::with_keyboard(messages::expense_report(period, &expenses), keyboards::period_selection()))
    }

    async fn list_categories(&self, telegram_id: i64) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let categories = self.ledger.list_categories(user.id).await?;
        Ok(Reply::with_keyboard(messages::category_list(&categories), keyboards::category_menu()))
    }

    async fn settings_menu(&self, telegram_id: i64) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        Ok(Reply::with_keyboard(
            messages::settings_menu(&user.name, user.has_access_code()),
            keyboards::settings_menu(user.has_access_code()),
        ))
    }

    async fn issue_access_code(&self, telegram_id: i64, regenerated: bool) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        let code = generate_access_code(self.web.access_code_length);
        self.ledger.set_access_code(user.id, &code).await?;
        info!(user_id = telegram_id, regenerated = regenerated, "Web access code issued");

        Ok(Reply::with_keyboard(
            messages::access_code_generated(&code, regenerated),
            keyboards::access_code_actions(),
        ))
    }

    async fn show_access_code(&self, telegram_id: i64) -> Result<Reply> {
        let Some(user) = self.ledger.find_user(telegram_id).await? else {
            return Ok(self.user_not_found());
        };

        match user.access_code.as_deref() {
            Some(code) => Ok(Reply::with_keyboard(messages::access_code(code), keyboards::access_code_actions())),
            None => Ok(Reply::with_keyboard(
                messages::no_access_code(),
                keyboards::settings_menu(false),
            )),
        }
    }

    fn user_not_found(&self) -> Reply {
        Reply::text(messages::user_not_found())
    }

    /// The stored data cannot support the requested step; start over
    fn conversation_lost(&self, telegram_id: i64, reason: &str) -> Reply {
        warn!(user_id = telegram_id, reason = reason, "Conversation data inconsistent, resetting");
        self.store.clear_state(telegram_id);
        Reply::with_keyboard(messages::conversation_lost(), keyboards::main_menu())
    }
}

/// First active category whose name matches the receipt's hint, else the first category
fn suggest_category<'a>(analysis: &ReceiptAnalysis, categories: &'a [Category]) -> Option<&'a Category> {
    analysis
        .category_candidates()
        .iter()
        .find_map(|candidate| {
            categories
                .iter()
                .find(|category| category.name.to_lowercase().contains(&candidate.to_lowercase()))
        })
        .or_else(|| categories.first())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
