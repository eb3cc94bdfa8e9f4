//! Inline button payloads
//!
//! Buttons carry `action:sub:param` strings. `CallbackAction` is the parsed
//! form; its `Display` produces the payload, so keyboards and the parser can
//! never disagree.

use std::fmt;
use crate::models::Period;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    MainMenu,
    RegisterExpense,
    ViewMenu,
    ViewExpenses(Period),
    ConfirmExpense,
    CancelExpense,
    AddDescription,
    SelectCategory(i64),
    CategoryMenu,
    ListCategories,
    PhotoGuide,
    ConfirmPhoto,
    CancelPhoto,
    SettingsMenu,
    GenerateCode,
    ViewCode,
    RegenerateCode,
    ShowId,
    WebHelp,
    Unknown(String),
}

impl CallbackAction {
    pub fn parse(data: &str) -> Self {
        let parts: Vec<&str> = data.split(':').collect();

        match parts.as_slice() {
            ["main", "menu"] => CallbackAction::MainMenu,
            ["expense", "register"] => CallbackAction::RegisterExpense,
            ["expense", "view_menu"] => CallbackAction::ViewMenu,
            ["expense", "view", period] => match Period::parse(period) {
                Some(period) => CallbackAction::ViewExpenses(period),
                None => CallbackAction::Unknown(data.to_string()),
            },
            ["expense", "confirm"] | ["confirm", "yes"] => CallbackAction::ConfirmExpense,
            ["expense", "cancel"] | ["confirm", "no"] => CallbackAction::CancelExpense,
            ["expense", "add_description"] => CallbackAction::AddDescription,
            ["category", "expense_select", id] => match id.parse::<i64>() {
                Ok(id) => CallbackAction::SelectCategory(id),
                Err(_) => CallbackAction::Unknown(data.to_string()),
            },
            ["category", "menu"] => CallbackAction::CategoryMenu,
            ["category", "list"] => CallbackAction::ListCategories,
            ["photo", "guide"] => CallbackAction::PhotoGuide,
            ["photo", "confirm"] => CallbackAction::ConfirmPhoto,
            ["photo", "cancel"] => CallbackAction::CancelPhoto,
            ["settings", "menu"] => CallbackAction::SettingsMenu,
            ["settings", "generate_code"] => CallbackAction::GenerateCode,
            ["settings", "view_code"] => CallbackAction::ViewCode,
            ["settings", "regenerate_code"] => CallbackAction::RegenerateCode,
            ["settings", "show_id"] => CallbackAction::ShowId,
            ["settings", "web_help"] => CallbackAction::WebHelp,
            _ => CallbackAction::Unknown(data.to_string()),
        }
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::MainMenu => f.write_str("main:menu"),
            CallbackAction::RegisterExpense => f.write_str("expense:register"),
            CallbackAction::ViewMenu => f.write_str("expense:view_menu"),
            CallbackAction::ViewExpenses(period) => write!(f, "expense:view:{}", period.as_str()),
            CallbackAction::ConfirmExpense => f.write_str("expense:confirm"),
            CallbackAction::CancelExpense => f.write_str("expense:cancel"),
            CallbackAction::AddDescription => f.write_str("expense:add_description"),
            CallbackAction::SelectCategory(id) => write!(f, "category:expense_select:{}", id),
            CallbackAction::CategoryMenu => f.write_str("category:menu"),
            CallbackAction::ListCategories => f.write_str("category:list"),
            CallbackAction::PhotoGuide => f.write_str("photo:guide"),
            CallbackAction::ConfirmPhoto => f.write_str("photo:confirm"),
            CallbackAction::CancelPhoto => f.write_str("photo:cancel"),
            CallbackAction::SettingsMenu => f.write_str("settings:menu"),
            CallbackAction::GenerateCode => f.write_str("settings:generate_code"),
            CallbackAction::ViewCode => f.write_str("settings:view_code"),
            CallbackAction::RegenerateCode => f.write_str("settings:regenerate_code"),
            CallbackAction::ShowId => f.write_str("settings:show_id"),
            CallbackAction::WebHelp => f.write_str("settings:web_help"),
            CallbackAction::Unknown(data) => f.write_str(data),
        }
    }
}
