//! Inline keyboards shown by the dialogue

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use crate::dialogue::actions::CallbackAction;
use crate::models::{Category, Period};

fn button(text: &str, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), action.to_string())
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("📷 Enviar Comprovante", CallbackAction::PhotoGuide),
            button("💰 Registrar Gasto", CallbackAction::RegisterExpense),
        ],
        vec![
            button("💸 Ver Gastos", CallbackAction::ViewMenu),
            button("🏷️ Categorias", CallbackAction::CategoryMenu),
        ],
        vec![
            button("⚙️ Configurações", CallbackAction::SettingsMenu),
            button("🆔 Meu ID", CallbackAction::ShowId),
        ],
    ])
}

pub fn back_to_main() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Menu Principal", CallbackAction::MainMenu)]])
}

pub fn cancel_only() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("❌ Cancelar", CallbackAction::CancelExpense)]])
}

/// Two categories per row followed by a cancel button
pub fn category_grid(categories: &[Category]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = categories
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|category| button(&category.label(), CallbackAction::SelectCategory(category.id)))
                .collect()
        })
        .collect();

    rows.push(vec![button("❌ Cancelar", CallbackAction::CancelExpense)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn expense_confirmation() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("📝 Adicionar Descrição", CallbackAction::AddDescription)],
        vec![
            button("✅ Confirmar", CallbackAction::ConfirmExpense),
            button("❌ Cancelar", CallbackAction::CancelExpense),
        ],
    ])
}

pub fn period_selection() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("📅 Hoje", CallbackAction::ViewExpenses(Period::Today)),
            button("📆 Semana", CallbackAction::ViewExpenses(Period::Week)),
        ],
        vec![button("🗓️ Mês", CallbackAction::ViewExpenses(Period::Month))],
        vec![button("🔙 Menu Principal", CallbackAction::MainMenu)],
    ])
}

pub fn category_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("📋 Listar Categorias", CallbackAction::ListCategories)],
        vec![button("🔙 Voltar", CallbackAction::MainMenu)],
    ])
}

pub fn photo_guide() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("💰 Registro Manual", CallbackAction::RegisterExpense)],
        vec![button("🔙 Menu Principal", CallbackAction::MainMenu)],
    ])
}

pub fn photo_confirmation() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("✅ Confirmar Gasto", CallbackAction::ConfirmPhoto)],
        vec![button("❌ Cancelar", CallbackAction::CancelPhoto)],
    ])
}

pub fn settings_menu(has_access_code: bool) -> InlineKeyboardMarkup {
    let mut rows = if has_access_code {
        vec![
            vec![button("👁️ Ver Código", CallbackAction::ViewCode)],
            vec![button("🔄 Gerar Novo Código", CallbackAction::RegenerateCode)],
        ]
    } else {
        vec![vec![button("🔑 Gerar Código de Acesso", CallbackAction::GenerateCode)]]
    };

    rows.push(vec![button("🌐 Ajuda Web", CallbackAction::WebHelp)]);
    rows.push(vec![button("🔙 Menu Principal", CallbackAction::MainMenu)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn access_code_actions() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🔄 Regenerar", CallbackAction::RegenerateCode)],
        vec![button("🔙 Configurações", CallbackAction::SettingsMenu)],
    ])
}

pub fn back_to_settings() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("⚙️ Configurações", CallbackAction::SettingsMenu)],
        vec![button("🔙 Menu Principal", CallbackAction::MainMenu)],
    ])
}
