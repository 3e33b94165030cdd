pub mod lessons;
pub mod stats;
pub mod students;
pub mod teachers;
pub mod templates;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Tutoring schedule commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Show lessons for a day: /lessons [YYYY-MM-DD|today|tomorrow]")]
    Lessons { date: String },
    #[command(description = "Add a weekly lesson: /addlesson teacher | student | weekday | HH:MM | price")]
    AddLesson { form: String },
    #[command(description = "Show the weekly schedule")]
    Templates,
    #[command(description = "List teachers")]
    Teachers,
    #[command(description = "Add a teacher: /addteacher <name>")]
    AddTeacher { name: String },
    #[command(description = "List students")]
    Students,
    #[command(description = "Add a student: /addstudent <name>")]
    AddStudent { name: String },
    #[command(description = "Show revenue: /stats [today|week|month|year|<start> <end>]")]
    Stats { period: String },
}
