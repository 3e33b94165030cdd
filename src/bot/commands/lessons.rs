use teloxide::prelude::*;

use crate::bot::views::render_day;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::schedule::ensure_instances_for_date;
use crate::utils::datetime::{parse_date, today};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;

pub async fn handle_lessons(
    bot: Bot,
    msg: Message,
    date: String,
    db: &DatabaseManager,
    config: &Config,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);
    let today = today();

    let date = match parse_date(&date, today) {
        Ok(date) => date,
        Err(e) => {
            let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
            log_validation_error("lessons", &date, &e.to_string(), user_id);
            feedback
                .validation_error(&e.to_string(), "Try /lessons, /lessons tomorrow or /lessons 2026-10-19")
                .await?;
            return Ok(());
        }
    };

    let lessons = match ensure_instances_for_date(&db.pool, date).await {
        Ok(lessons) => lessons,
        Err(e) => {
            feedback.service_error("load lessons", &e).await?;
            return Ok(());
        }
    };

    let (text, keyboard) = render_day(date, today, &lessons, &config.currency);
    bot.send_message(msg.chat.id, text).reply_markup(keyboard).await?;

    Ok(())
}
