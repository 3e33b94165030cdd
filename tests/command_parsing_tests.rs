use teloxide::utils::command::BotCommands;
use tutor_scheduler_bot::bot::commands::Command;

#[cfg(test)]
mod command_parsing_tests {
    use super::*;

    #[test]
    fn test_help_and_start_command_parsing() {
        assert_eq!(Command::parse("/help", "testbot").unwrap(), Command::Help);
        assert_eq!(Command::parse("/start", "testbot").unwrap(), Command::Start);
    }

    #[test]
    fn test_lessons_without_date() {
        let result = Command::parse("/lessons", "testbot").unwrap();
        assert_eq!(result, Command::Lessons { date: String::new() });
    }

    #[test]
    fn test_lessons_with_date() {
        let result = Command::parse("/lessons 2026-10-19", "testbot").unwrap();
        assert_eq!(result, Command::Lessons { date: "2026-10-19".to_string() });
    }

    #[test]
    fn test_addlesson_keeps_whole_form() {
        let result = Command::parse("/addlesson Anna Petrova | Boris | Monday | 16:00 | 1000", "testbot").unwrap();
        assert_eq!(
            result,
            Command::AddLesson { form: "Anna Petrova | Boris | Monday | 16:00 | 1000".to_string() }
        );
    }

    #[test]
    fn test_add_people_keep_spaces_in_names() {
        assert_eq!(
            Command::parse("/addteacher Anna Petrova", "testbot").unwrap(),
            Command::AddTeacher { name: "Anna Petrova".to_string() }
        );
        assert_eq!(
            Command::parse("/addstudent Иван Иванов", "testbot").unwrap(),
            Command::AddStudent { name: "Иван Иванов".to_string() }
        );
    }

    #[test]
    fn test_list_commands() {
        assert_eq!(Command::parse("/teachers", "testbot").unwrap(), Command::Teachers);
        assert_eq!(Command::parse("/students", "testbot").unwrap(), Command::Students);
        assert_eq!(Command::parse("/templates", "testbot").unwrap(), Command::Templates);
    }

    #[test]
    fn test_stats_with_custom_range() {
        let result = Command::parse("/stats 2026-09-01 2026-09-30", "testbot").unwrap();
        assert_eq!(result, Command::Stats { period: "2026-09-01 2026-09-30".to_string() });
    }

    #[test]
    fn test_command_with_bot_mention() {
        let result = Command::parse("/stats@testbot month", "testbot").unwrap();
        assert_eq!(result, Command::Stats { period: "month".to_string() });
    }

    #[test]
    fn test_invalid_command() {
        assert!(Command::parse("/schedule", "testbot").is_err());
        assert!(Command::parse("not a command", "testbot").is_err());
    }

    #[test]
    fn test_descriptions_list_commands() {
        let help = Command::descriptions().to_string();
        assert!(help.contains("/addlesson"));
        assert!(help.contains("/stats"));
    }
}
