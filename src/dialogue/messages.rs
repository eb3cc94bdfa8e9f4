//! Message texts shown by the dialogue
//!
//! All texts are HTML; anything typed by a user or read from the database is
//! escaped before it is interpolated.

use teloxide::utils::html::escape;
use crate::models::{Category, ExpenseView, Period, ReceiptAnalysis};
use crate::utils::helpers::{format_amount, format_cents, format_date, format_total_cents, truncate_text};

pub fn welcome(name: &str) -> String {
    format!(
        "👋 Olá, <b>{}</b>!\n\n\
         Eu sou o <b>GEDIE</b>, seu assistente de gastos.\n\
         Registre despesas, envie comprovantes e acompanhe seus gastos por período.\n\n\
         O que você quer fazer?",
        escape(name)
    )
}

pub fn main_menu() -> String {
    "🏠 <b>Menu Principal</b>\n\nEscolha uma opção:".to_string()
}

pub fn help() -> String {
    "ℹ️ <b>Como usar o GEDIE</b>\n\n\
     💰 <b>Registrar Gasto</b>: escolha a categoria, digite o valor e confirme.\n\
     📷 <b>Enviar Comprovante</b>: mande a foto de uma nota fiscal.\n\
     💸 <b>Ver Gastos</b>: totais de hoje, da semana ou do mês.\n\n\
     Comandos:\n\
     /start - menu principal\n\
     /cancel - cancela a operação atual\n\
     /help - esta mensagem"
        .to_string()
}

pub fn select_category() -> String {
    "🏷️ <b>Registrar Gasto</b>\n\nEscolha a categoria:".to_string()
}

pub fn no_categories() -> String {
    "⚠️ Você ainda não tem categorias cadastradas.".to_string()
}

pub fn enter_amount(category: &Category) -> String {
    format!(
        "{}\n\n💰 Digite o valor do gasto:\n<i>Exemplo: 42,50</i>",
        escape(&category.label())
    )
}

pub fn invalid_amount() -> String {
    "❌ Valor inválido. Digite um número positivo, por exemplo <code>42,50</code>.".to_string()
}

pub fn confirm_expense(amount: f64, category: &Category, description: Option<&str>) -> String {
    let mut text = format!(
        "📋 <b>Confirme o gasto</b>\n\n\
         🏷️ Categoria: {}\n\
         💰 Valor: <b>{}</b>",
        escape(&category.label()),
        format_amount(amount)
    );
    if let Some(description) = description {
        text.push_str(&format!("\n📝 Descrição: {}", escape(description)));
    }
    text
}

pub fn enter_description() -> String {
    "📝 Digite uma descrição para o gasto:".to_string()
}

pub fn expense_saved(amount_cents: i64, category: Option<&Category>, description: Option<&str>) -> String {
    let category = category
        .map(|category| escape(&category.label()))
        .unwrap_or_else(|| "Categoria".to_string());

    let mut text = format!(
        "✅ <b>Gasto registrado!</b>\n\n🏷️ {}\n💰 {}",
        category,
        format_cents(amount_cents)
    );
    if let Some(description) = description {
        text.push_str(&format!("\n📝 {}", escape(description)));
    }
    text
}

pub fn expense_cancelled() -> String {
    "❌ Operação cancelada.".to_string()
}

pub fn conversation_lost() -> String {
    "⚠️ Os dados do gasto foram perdidos. Vamos recomeçar pelo menu.".to_string()
}

pub fn use_buttons() -> String {
    "🤔 Não entendi. Use os botões abaixo:".to_string()
}

pub fn unknown_action() -> String {
    "❌ Ação não reconhecida.".to_string()
}

pub fn user_not_found() -> String {
    "⚠️ Usuário não encontrado. Envie /start para se cadastrar.".to_string()
}

pub fn category_not_found() -> String {
    "⚠️ Categoria não encontrada.".to_string()
}

pub fn generic_error() -> String {
    "❌ Ocorreu um erro. Tente novamente.".to_string()
}

pub fn period_selection() -> String {
    "💸 <b>Ver Gastos</b>\n\nEscolha o período:".to_string()
}

/// Expenses listed individually in a report; the rest only count toward the total
pub const REPORT_MAX_LINES: usize = 10;

/// Expense report: the most recent expenses and the total of all of them
pub fn expense_report(period: Period, expenses: &[ExpenseView]) -> String {
    let mut text = format!("💸 <b>{}</b>\n\n", period.title());

    if expenses.is_empty() {
        text.push_str("Nenhum gasto registrado neste período.");
        return text;
    }

    for expense in expenses.iter().take(REPORT_MAX_LINES) {
        text.push_str(&format!(
            "{} {} <b>{}</b> ({})",
            escape(&expense.category_icon),
            escape(&expense.category_name),
            format_cents(expense.amount_cents),
            format_date(expense.spent_on)
        ));
        if let Some(description) = &expense.description {
            text.push_str(&format!("\n    📝 {}", escape(&truncate_text(description, 40))));
        }
        text.push('\n');
    }

    if expenses.len() > REPORT_MAX_LINES {
        text.push_str(&format!("<i>... e mais {} gastos</i>\n", expenses.len() - REPORT_MAX_LINES));
    }

    let total: i128 = expenses.iter().map(|expense| i128::from(expense.amount_cents)).sum();
    text.push_str(&format!(
        "\n💰 <b>Total: {}</b> em {} gasto(s)",
        format_total_cents(total),
        expenses.len()
    ));
    text
}

pub fn category_menu() -> String {
    "🏷️ <b>Categorias</b>".to_string()
}

pub fn category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return no_categories();
    }

    let lines: Vec<String> = categories
        .iter()
        .map(|category| format!("• {}", escape(&category.label())))
        .collect();
    format!("🏷️ <b>Suas Categorias</b>\n\n{}", lines.join("\n"))
}

pub fn photo_guide() -> String {
    "📷 <b>Enviar Comprovante</b>\n\n\
     Envie a foto de uma nota fiscal ou recibo.\n\
     Dicas: boa iluminação, foto nítida e o valor total visível."
        .to_string()
}

pub fn photo_unavailable() -> String {
    "📷 A leitura automática de comprovantes não está disponível.\n\
     Registre o gasto manualmente:"
        .to_string()
}

pub fn receipt_unreadable(reason: &str) -> String {
    format!(
        "❌ Não consegui ler o comprovante.\n<i>{}</i>\n\nTente outra foto ou registre manualmente.",
        escape(reason)
    )
}

pub fn receipt_analysis(analysis: &ReceiptAnalysis, category: Option<&Category>) -> String {
    let level = analysis.confidence_level();
    let amount = analysis
        .usable_amount()
        .map(format_amount)
        .unwrap_or_else(|| "não identificado".to_string());
    let merchant = analysis
        .merchant
        .as_deref()
        .map(escape)
        .unwrap_or_else(|| "não identificado".to_string());
    let category = category
        .map(|category| escape(&category.label()))
        .unwrap_or_else(|| "não identificada".to_string());

    format!(
        "🔍 <b>Comprovante analisado</b>\n\n\
         💰 Valor: <b>{}</b>\n\
         🏪 Estabelecimento: {}\n\
         🏷️ Categoria: {}\n\
         {} Confiança: {} ({:.0}%)\n\n\
         Confirma o registro?",
        amount,
        merchant,
        category,
        level.icon(),
        level.label(),
        analysis.confidence * 100.0
    )
}

pub fn photo_cancelled() -> String {
    "❌ Registro do comprovante cancelado.".to_string()
}

pub fn settings_menu(name: &str, has_access_code: bool) -> String {
    let code_status = if has_access_code { "✅ configurado" } else { "❌ não configurado" };
    format!(
        "⚙️ <b>Configurações</b>\n\n👤 {}\n🔑 Código de acesso web: {}",
        escape(name),
        code_status
    )
}

pub fn access_code_generated(code: &str, regenerated: bool) -> String {
    let title = if regenerated { "🔄 <b>Novo código gerado</b>" } else { "🔑 <b>Código de acesso gerado</b>" };
    format!(
        "{}\n\nSeu código: <code>{}</code>\n\nUse-o junto com seu ID do Telegram para entrar no painel web.",
        title,
        escape(code)
    )
}

pub fn access_code(code: &str) -> String {
    format!("🔑 Seu código de acesso: <code>{}</code>", escape(code))
}

pub fn no_access_code() -> String {
    "⚠️ Você ainda não gerou um código de acesso.".to_string()
}

pub fn telegram_id(telegram_id: i64) -> String {
    format!("🆔 Seu ID do Telegram: <code>{}</code>", telegram_id)
}

pub fn web_help(dashboard_url: Option<&str>) -> String {
    let location = dashboard_url
        .map(|url| format!("Acesse: {}", escape(url)))
        .unwrap_or_else(|| "O endereço do painel ainda não foi configurado.".to_string());
    format!(
        "🌐 <b>Painel Web</b>\n\n\
         1. Gere um código de acesso em Configurações\n\
         2. Entre com seu ID do Telegram e o código\n\n\
         {}",
        location
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn view(amount_cents: i64, description: Option<&str>) -> ExpenseView {
        ExpenseView {
            id: 1,
            amount_cents,
            description: description.map(str::to_string),
            spent_on: NaiveDate::from_ymd_opt(2026, 10, 15).unwrap(),
            category_name: "Casa".to_string(),
            category_icon: "🏠".to_string(),
        }
    }

    #[test]
    fn test_expense_report_total() {
        let text = expense_report(Period::Today, &[view(1000, None), view(250, Some("pão"))]);
        assert!(text.contains("R$ 12,50"));
        assert!(text.contains("2 gasto(s)"));
        assert!(text.contains("15/10/2026"));
    }

    #[test]
    fn test_expense_report_caps_lines() {
        let expenses: Vec<ExpenseView> = (0..25)
            .map(|_| view(100, Some("uma descrição bem longa para ocupar espaço na mensagem")))
            .collect();
        let text = expense_report(Period::Month, &expenses);

        assert_eq!(text.matches("📝").count(), REPORT_MAX_LINES);
        assert!(text.contains("e mais 15 gastos"));
        assert!(text.contains("Total: R$ 25,00"));
        assert!(text.contains("25 gasto(s)"));
    }

    #[test]
    fn test_expense_report_total_does_not_overflow() {
        let text = expense_report(Period::Today, &[view(i64::MAX, None), view(i64::MAX, None)]);
        assert!(text.contains("Total: R$ 184467440737095516,14"));
    }

    #[test]
    fn test_expense_report_empty() {
        let text = expense_report(Period::Month, &[]);
        assert!(text.contains("Gastos deste Mês"));
        assert!(text.contains("Nenhum gasto"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        assert!(welcome("<script>").contains("&lt;script&gt;"));
    }
}
