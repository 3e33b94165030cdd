use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::bot::commands::{self, Command};
use crate::bot::handlers::{BotHandler, HandlerResult};
use crate::utils::logging::{log_command_error, log_command_start, log_command_success};

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Help => "help",
        Command::Start => "start",
        Command::Lessons { .. } => "lessons",
        Command::AddLesson { .. } => "addlesson",
        Command::Templates => "templates",
        Command::Teachers => "teachers",
        Command::AddTeacher { .. } => "addteacher",
        Command::Students => "students",
        Command::AddStudent { .. } => "addstudent",
        Command::Stats { .. } => "stats",
    }
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    handler: BotHandler,
) -> HandlerResult {
    let name = command_name(&cmd);
    let chat_id = msg.chat.id.0;
    let (username, user_id) = msg
        .from()
        .map(|u| (u.username.clone().unwrap_or_else(|| u.first_name.clone()), u.id.0 as i64))
        .unwrap_or_else(|| ("unknown".to_string(), 0));

    if !handler.is_allowed(msg.from()) {
        tracing::warn!("Rejected /{} from user {} in chat {}", name, user_id, chat_id);
        bot.send_message(msg.chat.id, "⛔ You are not allowed to use this bot.").await?;
        return Ok(());
    }

    log_command_start(name, &username, user_id, chat_id, None);

    let db = handler.db.as_ref();
    let config = handler.config.as_ref();
    let result = match cmd {
        Command::Help => bot
            .send_message(msg.chat.id, Command::descriptions().to_string())
            .await
            .map(|_| ()),
        Command::Start => bot
            .send_message(
                msg.chat.id,
                "📚 Welcome to the tutoring scheduler!\n\n\
                Use /lessons to see today's lessons, /addlesson to set up a weekly lesson \
                and /stats for revenue.\nUse /help to see all commands.",
            )
            .await
            .map(|_| ()),
        Command::Lessons { date } => commands::lessons::handle_lessons(bot, msg, date, db, config).await,
        Command::AddLesson { form } => commands::templates::handle_add_lesson(bot, msg, form, db).await,
        Command::Templates => commands::templates::handle_templates(bot, msg, db, config).await,
        Command::Teachers => commands::teachers::handle_teachers(bot, msg, db).await,
        Command::AddTeacher { name } => commands::teachers::handle_add_teacher(bot, msg, name, db).await,
        Command::Students => commands::students::handle_students(bot, msg, db).await,
        Command::AddStudent { name } => commands::students::handle_add_student(bot, msg, name, db).await,
        Command::Stats { period } => commands::stats::handle_stats(bot, msg, period, db, config).await,
    };

    match result {
        Ok(()) => {
            log_command_success(name, user_id, chat_id, None);
            Ok(())
        }
        Err(e) => {
            log_command_error(name, user_id, chat_id, &e.to_string());
            Err(e.into())
        }
    }
}
