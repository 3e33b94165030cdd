use teloxide::prelude::*;

use crate::bot::views::render_statistics;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::statistics::{compute_statistics, Period};
use crate::utils::datetime::today;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;

pub async fn handle_stats(
    bot: Bot,
    msg: Message,
    period: String,
    db: &DatabaseManager,
    config: &Config,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let parsed = match Period::parse(&period) {
        Ok(parsed) => parsed,
        Err(e) => {
            let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
            log_validation_error("stats", &period, &e.to_string(), user_id);
            feedback
                .validation_error(&e.to_string(), "/stats month or /stats 2026-09-01 2026-09-30")
                .await?;
            return Ok(());
        }
    };

    let range = parsed.range(today(), config.week_start);
    match compute_statistics(&db.pool, range.0, range.1, config.teacher_rate).await {
        Ok(stats) => {
            let (text, keyboard) =
                render_statistics(parsed, range, &stats, config.teacher_rate, &config.currency);
            bot.send_message(msg.chat.id, text).reply_markup(keyboard).await?;
        }
        Err(e) => {
            feedback.service_error("compute statistics", &e).await?;
        }
    }

    Ok(())
}
