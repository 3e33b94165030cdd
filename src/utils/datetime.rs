use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Weekday number with 0 = Sunday .. 6 = Saturday.
pub fn day_of_week(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_sunday())
}

pub fn weekday_name(day_of_week: i64) -> &'static str {
    usize::try_from(day_of_week)
        .ok()
        .and_then(|i| WEEKDAY_NAMES.get(i))
        .copied()
        .unwrap_or("Unknown day")
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Years accepted from operator input. Dates are stored as `YYYY-MM-DD`
/// text, so range queries only compare correctly for four-digit years.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Resolves what the operator typed after `/lessons`. Blank means today.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "" | "today" | "сегодня" => return Ok(today),
        "tomorrow" | "завтра" => return Ok(today + Duration::days(1)),
        "yesterday" | "вчера" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    let date = NaiveDate::parse_from_str(&input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&input, "%d.%m.%Y"))
        .map_err(|_| anyhow!("Date '{}' must look like YYYY-MM-DD", input))?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(anyhow!("Year must be between {} and {}", MIN_YEAR, MAX_YEAR));
    }

    Ok(date)
}

pub fn parse_week_start(input: &str) -> Result<Weekday> {
    match input.trim().to_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "sunday" | "sun" => Ok(Weekday::Sun),
        other => Err(anyhow!("WEEK_START must be 'monday' or 'sunday', got '{}'", other)),
    }
}
