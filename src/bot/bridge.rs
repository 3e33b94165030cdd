//! Host bridge backed by a Telegram callback query.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use teloxide::prelude::*;

use crate::bot::callback_data::CallbackAction;
use crate::bot::views::confirm_keyboard;
use crate::services::bridge::{HostBridge, NotificationKind};

/// Answers one button press. Telegram expects exactly one answer per
/// callback query, so every signal after the first is dropped.
///
/// Confirmation is a two-step exchange: the first press posts a Yes/No
/// prompt whose "Yes" button carries the confirmed form of the same action,
/// and only that second press is approved.
pub struct TelegramBridge {
    bot: Bot,
    query_id: String,
    chat_id: ChatId,
    action: CallbackAction,
    answered: AtomicBool,
}

impl TelegramBridge {
    pub fn new(bot: Bot, query_id: String, chat_id: ChatId, action: CallbackAction) -> Self {
        Self {
            bot,
            query_id,
            chat_id,
            action,
            answered: AtomicBool::new(false),
        }
    }

    async fn answer(&self, text: Option<&str>) {
        if self.answered.swap(true, Ordering::SeqCst) {
            return;
        }

        let request = self.bot.answer_callback_query(self.query_id.clone());
        let result = match text {
            Some(text) => request.text(text).await,
            None => request.await,
        };

        if let Err(e) = result {
            tracing::warn!("Failed to answer callback query {}: {}", self.query_id, e);
        }
    }

    /// Stops the client's loading spinner if nothing has answered yet.
    pub async fn finish(&self) {
        self.answer(None).await;
    }

    /// Shows `text` as a modal alert instead of a toast.
    pub async fn fail(&self, text: &str) {
        if self.answered.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Err(e) = self
            .bot
            .answer_callback_query(self.query_id.clone())
            .text(text)
            .show_alert(true)
            .await
        {
            tracing::warn!("Failed to answer callback query {}: {}", self.query_id, e);
        }
    }
}

#[async_trait]
impl HostBridge for TelegramBridge {
    async fn notify(&self, kind: NotificationKind) {
        let text = match kind {
            NotificationKind::Success => "✅ Done",
            NotificationKind::Warning => "⚠️ Lesson cancelled",
        };
        self.answer(Some(text)).await;
    }

    async fn confirm(&self, message: &str) -> bool {
        if self.action.is_confirmed() {
            return true;
        }

        let Some(confirmed) = self.action.confirmed() else {
            tracing::warn!("Confirmation requested for non-destructive action {:?}", self.action);
            return false;
        };

        if let Err(e) = self
            .bot
            .send_message(self.chat_id, format!("⚠️ {message}"))
            .reply_markup(confirm_keyboard(confirmed))
            .await
        {
            tracing::warn!("Failed to send confirmation prompt: {}", e);
        }

        self.answer(None).await;
        false
    }

    async fn selection_changed(&self) {
        self.answer(None).await;
    }
}
