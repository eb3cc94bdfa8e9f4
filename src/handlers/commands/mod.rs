//! Command handlers module
//!
//! This module contains handlers for the bot commands /start, /help and /cancel

use std::sync::Arc;
use teloxide::{Bot, types::Message, utils::command::BotCommands};
use tracing::debug;
use crate::dialogue::ExpenseDialogue;
use crate::handlers::{reply_or_fallback, send_reply};
use crate::utils::errors::{GedieError, Result};

/// All available bot commands
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "GEDIE commands:")]
pub enum Command {
    #[command(description = "Register and show the main menu")]
    Start,
    #[command(description = "Show help information")]
    Help,
    #[command(description = "Cancel the current operation")]
    Cancel,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: Arc<ExpenseDialogue>,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        GedieError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if !chat_id.is_user() {
        debug!(chat_id = ?chat_id, "Ignoring command outside a private chat");
        return Ok(());
    }

    debug!(user_id = user_id, command = ?cmd, "Processing command");

    let reply = match cmd {
        Command::Start => reply_or_fallback(user_id, "start", dialogue.on_start(user_id, &user.full_name()).await),
        Command::Help => dialogue.on_help(),
        Command::Cancel => dialogue.on_cancel(user_id),
    };

    send_reply(&bot, chat_id, reply).await
}
