use teloxide::prelude::*;

use crate::bot::views::render_teachers;
use crate::database::connection::DatabaseManager;
use crate::services::bridge::NoopBridge;
use crate::services::roster::{add_teacher, list_teachers};
use crate::utils::feedback::CommandFeedback;

pub async fn handle_teachers(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    match list_teachers(&db.pool).await {
        Ok(teachers) => {
            let (text, keyboard) = render_teachers(&teachers);
            bot.send_message(msg.chat.id, text).reply_markup(keyboard).await?;
        }
        Err(e) => {
            CommandFeedback::new(bot, msg.chat.id)
                .service_error("load teachers", &e)
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_add_teacher(
    bot: Bot,
    msg: Message,
    name: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    match add_teacher(&db.pool, &NoopBridge::default(), &name).await {
        Ok(teacher) => {
            feedback.success(&format!("Teacher added: {}", teacher.name)).await?;
        }
        Err(e) => {
            feedback.service_error("add the teacher", &e).await?;
        }
    }
    Ok(())
}
