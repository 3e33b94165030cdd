use teloxide::prelude::*;

use crate::bot::views::render_templates;
use crate::config::Config;
use crate::database::connection::DatabaseManager;
use crate::services::bridge::NoopBridge;
use crate::services::schedule::{add_template, list_templates};
use crate::utils::datetime::weekday_name;
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::log_validation_error;
use crate::utils::validation::parse_template_form;

pub async fn handle_templates(
    bot: Bot,
    msg: Message,
    db: &DatabaseManager,
    config: &Config,
) -> ResponseResult<()> {
    match list_templates(&db.pool).await {
        Ok(templates) => {
            bot.send_message(msg.chat.id, render_templates(&templates, &config.currency)).await?;
        }
        Err(e) => {
            CommandFeedback::new(bot, msg.chat.id)
                .service_error("load the weekly schedule", &e)
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_add_lesson(
    bot: Bot,
    msg: Message,
    form: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let parsed = match parse_template_form(&form) {
        Ok(parsed) => parsed,
        Err(e) => {
            let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
            log_validation_error("addlesson", &form, &e.to_string(), user_id);
            feedback
                .validation_error(
                    &e.to_string(),
                    "/addlesson Anna | Boris | Monday | 16:00 | 1000",
                )
                .await?;
            return Ok(());
        }
    };

    match add_template(&db.pool, &NoopBridge::default(), parsed).await {
        Ok(template) => {
            feedback
                .success(&format!(
                    "Weekly lesson added: every {} at {}",
                    weekday_name(template.day_of_week),
                    template.time
                ))
                .await?;
        }
        Err(e) => {
            feedback.service_error("add the lesson", &e).await?;
        }
    }

    Ok(())
}
