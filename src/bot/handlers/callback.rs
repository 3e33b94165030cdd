use chrono::NaiveDate;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use teloxide::{ApiError, RequestError};

use crate::bot::bridge::TelegramBridge;
use crate::bot::callback_data::CallbackAction;
use crate::bot::handlers::{BotHandler, HandlerResult};
use crate::bot::views::{self, View};
use crate::error::SchedulerError;
use crate::services::bridge::HostBridge;
use crate::services::statistics::{compute_statistics, Period};
use crate::services::{roster, schedule};
use crate::utils::datetime::today;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, handler: BotHandler) -> HandlerResult {
    let user_id = q.from.id.0;
    let username = q.from.username.as_deref().unwrap_or("unknown");

    if !handler.config.is_user_allowed(user_id) {
        tracing::warn!("Rejected callback from user {} ({})", username, user_id);
        bot.answer_callback_query(q.id).text("⛔ You are not allowed to use this bot").await?;
        return Ok(());
    }

    let Some(action) = q.data.as_deref().and_then(CallbackAction::parse) else {
        tracing::warn!("Unrecognized callback data {:?} from user {}", q.data, user_id);
        bot.answer_callback_query(q.id).text("This button is no longer valid").await?;
        return Ok(());
    };

    let Some(message) = q.message.as_ref() else {
        bot.answer_callback_query(q.id).text("This message is too old to update").await?;
        return Ok(());
    };
    let chat_id = message.chat.id;
    let message_id = message.id;

    tracing::info!(
        "Callback received: '{}' from user {} ({}) in chat {}",
        action.encode(), username, user_id, chat_id
    );

    let bridge = TelegramBridge::new(bot.clone(), q.id.clone(), chat_id, action.clone());
    let screen = Screen { bot: &bot, chat_id, message_id, handler: &handler };

    let result = match action {
        CallbackAction::ShowDay(date) => {
            bridge.selection_changed().await;
            screen.show_day(&bridge, date).await
        }
        CallbackAction::SetStatus { instance_id, status } => {
            match schedule::set_instance_status(&handler.db.pool, &bridge, &instance_id, status).await {
                Ok(instance) => screen.show_day(&bridge, instance.date).await,
                Err(e) => report(&bridge, "update the lesson", e).await,
            }
        }
        CallbackAction::DeleteInstance { instance_id, .. } => {
            match schedule::delete_instance(&handler.db.pool, &bridge, &instance_id).await {
                Ok(Some(instance)) => screen.show_day(&bridge, instance.date).await,
                Ok(None) => Ok(()),
                Err(e) => report(&bridge, "delete the lesson", e).await,
            }
        }
        CallbackAction::DeleteTeacher { teacher_id, .. } => {
            match roster::delete_teacher(&handler.db.pool, &bridge, &teacher_id).await {
                Ok(true) => screen.show_teachers(&bridge).await,
                Ok(false) => Ok(()),
                Err(e) => report(&bridge, "delete the teacher", e).await,
            }
        }
        CallbackAction::DeleteStudent { student_id, .. } => {
            match roster::delete_student(&handler.db.pool, &bridge, &student_id).await {
                Ok(true) => screen.show_students(&bridge).await,
                Ok(false) => Ok(()),
                Err(e) => report(&bridge, "delete the student", e).await,
            }
        }
        CallbackAction::ShowStats(period) => {
            bridge.selection_changed().await;
            screen.show_stats(&bridge, period).await
        }
        CallbackAction::Dismiss => {
            if let Err(e) = bot.delete_message(chat_id, message_id).await {
                tracing::debug!("Could not remove prompt {}: {}", message_id.0, e);
            }
            Ok(())
        }
    };

    bridge.finish().await;
    result
}

/// The message a button belongs to, re-rendered in place after each action.
struct Screen<'a> {
    bot: &'a Bot,
    chat_id: ChatId,
    message_id: MessageId,
    handler: &'a BotHandler,
}

impl Screen<'_> {
    async fn show_day(&self, bridge: &TelegramBridge, date: NaiveDate) -> HandlerResult {
        match schedule::ensure_instances_for_date(&self.handler.db.pool, date).await {
            Ok(lessons) => {
                let view = views::render_day(date, today(), &lessons, &self.handler.config.currency);
                self.replace(view).await
            }
            Err(e) => report(bridge, "load lessons", e).await,
        }
    }

    async fn show_teachers(&self, bridge: &TelegramBridge) -> HandlerResult {
        match roster::list_teachers(&self.handler.db.pool).await {
            Ok(teachers) => self.replace(views::render_teachers(&teachers)).await,
            Err(e) => report(bridge, "load teachers", e).await,
        }
    }

    async fn show_students(&self, bridge: &TelegramBridge) -> HandlerResult {
        match roster::list_students(&self.handler.db.pool).await {
            Ok(students) => self.replace(views::render_students(&students)).await,
            Err(e) => report(bridge, "load students", e).await,
        }
    }

    async fn show_stats(&self, bridge: &TelegramBridge, period: Period) -> HandlerResult {
        let config = &self.handler.config;
        let range = period.range(today(), config.week_start);

        match compute_statistics(&self.handler.db.pool, range.0, range.1, config.teacher_rate).await {
            Ok(stats) => {
                let view = views::render_statistics(period, range, &stats, config.teacher_rate, &config.currency);
                self.replace(view).await
            }
            Err(e) => report(bridge, "compute statistics", e).await,
        }
    }

    async fn replace(&self, (text, keyboard): View) -> HandlerResult {
        let result = self
            .bot
            .edit_message_text(self.chat_id, self.message_id, text)
            .reply_markup(keyboard)
            .await;

        match result {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

async fn report(bridge: &TelegramBridge, action: &str, err: SchedulerError) -> HandlerResult {
    match &err {
        SchedulerError::Database(e) => tracing::error!("Failed to {}: {}", action, e),
        other => tracing::warn!("Could not {}: {}", action, other),
    }
    bridge.fail(&err.user_message()).await;
    Ok(())
}
