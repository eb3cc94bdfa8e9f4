//! Bot handlers module
//!
//! Thin Telegram adapters around `ExpenseDialogue`:
//! - Command handlers for /start, /help and /cancel
//! - Callback handlers for inline keyboard interactions
//! - Message handlers for free text and photos

pub mod commands;
pub mod callbacks;
pub mod messages;

pub use commands::{handle_command, Command};
pub use callbacks::handle_callback_query;
pub use messages::handle_message;

use teloxide::{Bot, prelude::*, types::{ChatId, MessageId, ParseMode}};
use tracing::{debug, error};
use crate::dialogue::{keyboards, messages as texts, Reply};
use crate::utils::errors::Result;

/// Dialogue failures are logged and replaced by a generic error reply
pub(crate) fn reply_or_fallback(user_id: i64, action: &str, result: Result<Reply>) -> Reply {
    match result {
        Ok(reply) => reply,
        Err(e) => {
            error!(user_id = user_id, action = action, error = %e, severity = ?e.severity(), "Dialogue step failed");
            Reply::with_keyboard(texts::generic_error(), keyboards::main_menu())
        }
    }
}

pub(crate) async fn send_reply(bot: &Bot, chat_id: ChatId, reply: Reply) -> Result<()> {
    let mut request = bot.send_message(chat_id, reply.text).parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}

/// Replace the message the button belonged to, sending a new one if it can't be edited
pub(crate) async fn edit_reply(bot: &Bot, chat_id: ChatId, message_id: MessageId, reply: Reply) -> Result<()> {
    let mut request = bot
        .edit_message_text(chat_id, message_id, reply.text.clone())
        .parse_mode(ParseMode::Html);
    if let Some(keyboard) = reply.keyboard.clone() {
        request = request.reply_markup(keyboard);
    }

    if let Err(e) = request.await {
        debug!(chat_id = ?chat_id, error = %e, "Could not edit message, sending a new one");
        send_reply(bot, chat_id, reply).await?;
    }
    Ok(())
}
