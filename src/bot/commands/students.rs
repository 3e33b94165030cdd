use teloxide::prelude::*;

use crate::bot::views::render_students;
use crate::database::connection::DatabaseManager;
use crate::services::bridge::NoopBridge;
use crate::services::roster::{add_student, list_students};
use crate::utils::feedback::CommandFeedback;

pub async fn handle_students(bot: Bot, msg: Message, db: &DatabaseManager) -> ResponseResult<()> {
    match list_students(&db.pool).await {
        Ok(students) => {
            let (text, keyboard) = render_students(&students);
            bot.send_message(msg.chat.id, text).reply_markup(keyboard).await?;
        }
        Err(e) => {
            CommandFeedback::new(bot, msg.chat.id)
                .service_error("load students", &e)
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_add_student(
    bot: Bot,
    msg: Message,
    name: String,
    db: &DatabaseManager,
) -> ResponseResult<()> {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    match add_student(&db.pool, &NoopBridge::default(), &name).await {
        Ok(student) => {
            feedback.success(&format!("Student added: {}", student.name)).await?;
        }
        Err(e) => {
            feedback.service_error("add the student", &e).await?;
        }
    }
    Ok(())
}
