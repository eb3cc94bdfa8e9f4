//! Message handlers module
//!
//! Free text feeds the amount and description prompts; photos are receipts

use std::sync::Arc;
use teloxide::{Bot, net::Download, prelude::*, types::{Message, PhotoSize}};
use tracing::debug;
use crate::dialogue::ExpenseDialogue;
use crate::handlers::{reply_or_fallback, send_reply};
use crate::utils::errors::{GedieError, Result};

/// Handle incoming non-command messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: Arc<ExpenseDialogue>,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        GedieError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if !chat_id.is_user() {
        return Ok(());
    }

    let reply = if let Some(photos) = msg.photo() {
        debug!(user_id = user_id, sizes = photos.len(), "Photo received");
        if dialogue.has_receipt_analyzer() {
            let result = match download_largest(&bot, photos).await {
                Ok(image) => dialogue.on_photo(user_id, &image).await,
                Err(e) => Err(e),
            };
            reply_or_fallback(user_id, "photo", result)
        } else {
            dialogue.on_photo_without_analyzer(user_id)
        }
    } else if let Some(text) = msg.text() {
        debug!(user_id = user_id, "Text message received");
        reply_or_fallback(user_id, "text", dialogue.on_text(user_id, text).await)
    } else {
        debug!(user_id = user_id, "Ignoring unsupported message kind");
        return Ok(());
    };

    send_reply(&bot, chat_id, reply).await
}

/// Telegram lists the sizes of a photo smallest first
async fn download_largest(bot: &Bot, photos: &[PhotoSize]) -> Result<Vec<u8>> {
    let photo = photos.last().ok_or_else(|| {
        GedieError::InvalidInput("Photo message without sizes".to_string())
    })?;

    let file = bot.get_file(photo.file.id.clone()).await?;
    let mut image = Vec::new();
    bot.download_file(&file.path, &mut image).await?;
    Ok(image)
}
