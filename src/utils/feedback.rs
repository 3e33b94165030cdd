use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::error::SchedulerError;
use crate::utils::markdown::escape_markdown;

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
}

impl FeedbackType {
    pub fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }
}

/// Builds the MarkdownV2 body of a feedback message.
pub fn format_feedback(feedback_type: FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_markdown(message))
}

/// Missing records usually mean a stale reference, so they warn instead of erroring.
pub fn feedback_type_for(err: &SchedulerError) -> FeedbackType {
    match err {
        SchedulerError::NotFound(_) => FeedbackType::Warning,
        SchedulerError::Database(_) | SchedulerError::Validation(_) => FeedbackType::Error,
    }
}

/// Short alert-style replies sent to the operator's chat
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, format_feedback(feedback_type, message))
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }

    pub async fn success(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Success, message).await
    }

    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    pub async fn info(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Info, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        let message = format!("{error}\n\n💡 Suggestion: {suggestion}");
        self.send(FeedbackType::Error, &message).await
    }

    /// Logs a failed service call and shows the operator a generic alert.
    /// The conversation stays usable afterwards.
    pub async fn service_error(&self, action: &str, err: &SchedulerError) -> ResponseResult<Message> {
        match err {
            SchedulerError::Database(e) => {
                tracing::error!("Failed to {}: {}", action, e);
                self.error(&format!("Failed to {action}")).await
            }
            other => {
                tracing::warn!("Could not {}: {}", action, other);
                self.send(feedback_type_for(other), &other.user_message()).await
            }
        }
    }
}
