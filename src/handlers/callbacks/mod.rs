//! Callback query handlers module
//!
//! Every inline keyboard button ends up here

use std::sync::Arc;
use teloxide::{Bot, types::{CallbackQuery, ChatId}, prelude::*};
use tracing::{debug, warn};
use crate::dialogue::ExpenseDialogue;
use crate::handlers::{edit_reply, reply_or_fallback, send_reply};
use crate::utils::errors::Result;

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    dialogue: Arc<ExpenseDialogue>,
) -> Result<()> {
    let user_id = query.from.id.0 as i64;

    // Answer first to remove the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data.as_deref() else {
        debug!(user_id = user_id, "Callback query without data");
        return Ok(());
    };

    debug!(user_id = user_id, callback_data = %data, "Processing callback query");
    let reply = reply_or_fallback(user_id, data, dialogue.on_callback(user_id, data).await);

    match query.message.as_ref() {
        Some(message) => edit_reply(&bot, message.chat().id, message.id(), reply).await,
        None => send_reply(&bot, ChatId(user_id), reply).await,
    }
}
