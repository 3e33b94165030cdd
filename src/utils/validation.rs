use anyhow::{anyhow, Result};
use chrono::NaiveTime;

/// Parsed `/addlesson` arguments before teacher and student are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateForm {
    pub teacher: String,
    pub student: String,
    pub day_of_week: i64,
    pub time: String,
    pub price: f64,
}

pub fn validate_person_name(name: &str) -> Result<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(anyhow!("Name cannot be empty"));
    }

    if name.chars().count() > 100 {
        return Err(anyhow!("Name cannot be longer than 100 characters"));
    }

    if name.contains('\n') || name.contains('\r') {
        return Err(anyhow!("Name cannot contain line breaks"));
    }

    // Keeps form parsing unambiguous
    if name.contains('|') {
        return Err(anyhow!("Name cannot contain '|'"));
    }

    Ok(name.to_string())
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Positive IDs are user chats
    if chat_id > 2147483647 {
        return Err(anyhow!("Invalid user chat ID range"));
    }

    // Supergroups sit around -100xxxxxxxxxx
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

/// Accepts 0-6 (0 = Sunday) or an English or Russian weekday name.
pub fn parse_day_of_week(input: &str) -> Result<i64> {
    let input = input.trim().to_lowercase();

    if input.is_empty() {
        return Err(anyhow!("Weekday cannot be empty"));
    }

    if let Ok(number) = input.parse::<i64>() {
        if (0..=6).contains(&number) {
            return Ok(number);
        }
        return Err(anyhow!("Weekday number must be between 0 (Sunday) and 6 (Saturday)"));
    }

    let day = match input.as_str() {
        "sun" | "sunday" | "вс" | "воскресенье" => 0,
        "mon" | "monday" | "пн" | "понедельник" => 1,
        "tue" | "tuesday" | "вт" | "вторник" => 2,
        "wed" | "wednesday" | "ср" | "среда" => 3,
        "thu" | "thursday" | "чт" | "четверг" => 4,
        "fri" | "friday" | "пт" | "пятница" => 5,
        "sat" | "saturday" | "сб" | "суббота" => 6,
        _ => return Err(anyhow!("Unknown weekday '{}'", input)),
    };

    Ok(day)
}

/// Normalizes `H:MM`, `HH:MM` or `HH:MM:SS` to `HH:MM`.
pub fn parse_lesson_time(input: &str) -> Result<String> {
    let input = input.trim();

    let time = NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .map_err(|_| anyhow!("Time '{}' must look like HH:MM", input))?;

    Ok(time.format("%H:%M").to_string())
}

pub fn parse_price(input: &str) -> Result<f64> {
    let input = input.trim().replace(',', ".");

    if input.is_empty() {
        return Err(anyhow!("Price cannot be empty"));
    }

    let price: f64 = input
        .parse()
        .map_err(|_| anyhow!("Price '{}' is not a number", input))?;

    if !price.is_finite() || price < 0.0 {
        return Err(anyhow!("Price must be a non-negative number"));
    }

    Ok(price)
}

/// Parses `teacher | student | weekday | HH:MM | price`.
pub fn parse_template_form(input: &str) -> Result<TemplateForm> {
    let parts: Vec<&str> = input.split('|').map(str::trim).collect();

    if parts.len() != 5 || parts.iter().any(|p| p.is_empty()) {
        return Err(anyhow!("All fields are required: teacher | student | weekday | HH:MM | price"));
    }

    Ok(TemplateForm {
        teacher: parts[0].to_string(),
        student: parts[1].to_string(),
        day_of_week: parse_day_of_week(parts[2])?,
        time: parse_lesson_time(parts[3])?,
        price: parse_price(parts[4])?,
    })
}

/// Record ids travel through callback data, so only UUID-shaped text is accepted.
pub fn validate_record_id(record_id: &str) -> Result<()> {
    if record_id.is_empty() {
        return Err(anyhow!("Record ID cannot be empty"));
    }

    if record_id.len() > 40 {
        return Err(anyhow!("Record ID cannot be longer than 40 characters"));
    }

    if !record_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(anyhow!("Record ID can only contain letters, numbers, and hyphens"));
    }

    Ok(())
}
