use teloxide::prelude::*;

use crate::bot::handlers::{BotHandler, HandlerResult};
use crate::utils::feedback::CommandFeedback;

/// Nudges the operator towards the right command. Other chatter is ignored.
pub async fn handle_general_message(bot: Bot, msg: Message, handler: BotHandler) -> HandlerResult {
    if !handler.is_allowed(msg.from()) {
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    let feedback = CommandFeedback::new(bot, msg.chat.id);
    let lower = text.to_lowercase();

    if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or(text);
        feedback
            .validation_error(
                &format!("Unknown command: {command}"),
                "Use /help to see all available commands, or check your command syntax.",
            )
            .await?;
    } else if lower.contains("lesson") || lower.contains("урок") {
        feedback
            .info("Looking for lessons? Try /lessons, /lessons tomorrow or /templates")
            .await?;
    } else if lower.contains("help") {
        feedback.info("Use /help to see all available commands and examples!").await?;
    }

    Ok(())
}
