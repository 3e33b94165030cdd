use anyhow::{anyhow, Result};
use chrono::Weekday;
use std::env;
use tokio_cron_scheduler::Job;

use crate::utils::datetime::parse_week_start;
use crate::utils::validation::validate_telegram_chat_id;

/// Per-lesson payout to the teacher when `TEACHER_RATE` is not set.
pub const DEFAULT_TEACHER_RATE: f64 = 600.0;
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/tutoring.db";
pub const DEFAULT_AGENDA_CRON: &str = "0 0 8 * * *";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub http_port: u16,
    pub teacher_rate: f64,
    pub week_start: Weekday,
    pub currency: String,
    pub operator_chat_id: Option<i64>,
    pub agenda_cron: String,
    pub allowed_user_ids: Vec<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let database_url = Self::database_url_from_env();

        let http_port = non_blank_var("HTTP_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let teacher_rate = match non_blank_var("TEACHER_RATE") {
            Some(raw) => parse_teacher_rate(&raw)?,
            None => DEFAULT_TEACHER_RATE,
        };

        let week_start = match non_blank_var("WEEK_START") {
            Some(raw) => parse_week_start(&raw)?,
            None => Weekday::Mon,
        };

        let currency = non_blank_var("CURRENCY").unwrap_or_else(|| "₽".to_string());

        let operator_chat_id = match non_blank_var("OPERATOR_CHAT_ID") {
            Some(raw) => {
                let chat_id: i64 = raw
                    .parse()
                    .map_err(|_| anyhow!("Invalid OPERATOR_CHAT_ID"))?;
                validate_telegram_chat_id(chat_id)
                    .map_err(|e| anyhow!("Invalid OPERATOR_CHAT_ID: {}", e))?;
                Some(chat_id)
            }
            None => None,
        };

        let agenda_cron = non_blank_var("AGENDA_CRON")
            .unwrap_or_else(|| DEFAULT_AGENDA_CRON.to_string());
        validate_cron(&agenda_cron)?;

        let allowed_user_ids = match non_blank_var("ALLOWED_USER_IDS") {
            Some(raw) => parse_user_ids(&raw)?,
            None => Vec::new(),
        };

        Ok(Config {
            telegram_bot_token: token,
            database_url,
            http_port,
            teacher_rate,
            week_start,
            currency,
            operator_chat_id,
            agenda_cron,
            allowed_user_ids,
        })
    }

    /// `DATABASE_URL`, or the default SQLite file. Needs no bot token, so the
    /// migration tool can use it on its own.
    pub fn database_url_from_env() -> String {
        non_blank_var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// An empty allow-list lets everyone in.
    pub fn is_user_allowed(&self, user_id: u64) -> bool {
        self.allowed_user_ids.is_empty() || self.allowed_user_ids.contains(&user_id)
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_teacher_rate(raw: &str) -> Result<f64> {
    let rate: f64 = raw.parse().map_err(|_| anyhow!("Invalid TEACHER_RATE"))?;
    if !rate.is_finite() || rate < 0.0 {
        return Err(anyhow!("TEACHER_RATE must be a non-negative number"));
    }
    Ok(rate)
}

/// Rejects schedules the agenda job could not be registered with.
fn validate_cron(expression: &str) -> Result<()> {
    Job::new(expression, |_uuid, _scheduler| {})
        .map(|_| ())
        .map_err(|e| anyhow!("Invalid AGENDA_CRON '{}': {:?}", expression, e))
}

fn parse_user_ids(raw: &str) -> Result<Vec<u64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| anyhow!("Invalid user id '{}' in ALLOWED_USER_IDS", s)))
        .collect()
}
