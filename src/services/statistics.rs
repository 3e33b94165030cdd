use anyhow::anyhow;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::database::models::{LessonInstance, LessonStatus};
use crate::error::SchedulerError;

/// Reporting window picked by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    /// Inclusive calendar bounds of the period around `today`.
    pub fn range(&self, today: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
        match *self {
            Period::Today => (today, today),
            Period::Week => {
                let offset = (today.weekday().num_days_from_monday() + 7
                    - week_start.num_days_from_monday())
                    % 7;
                let start = today - Duration::days(i64::from(offset));
                (start, start + Duration::days(6))
            }
            Period::Month => {
                let start = today.with_day(1).unwrap_or(today);
                let next_month = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
                };
                let end = next_month
                    .map(|d| d - Duration::days(1))
                    .unwrap_or(today);
                (start, end)
            }
            Period::Year => {
                let start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let end = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                (start, end)
            }
            Period::Custom { start, end } => (start, end),
        }
    }

    /// Accepts `today`, `week`, `month`, `year` (blank means today) or two
    /// dates for a custom range.
    pub fn parse(input: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();

        match words.as_slice() {
            [] => Ok(Period::Today),
            [word] => match word.to_lowercase().as_str() {
                "today" => Ok(Period::Today),
                "week" => Ok(Period::Week),
                "month" => Ok(Period::Month),
                "year" => Ok(Period::Year),
                other => Err(anyhow!("Unknown period '{}'", other)),
            },
            [start, end] => {
                let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
                    .map_err(|_| anyhow!("Start date '{}' must look like YYYY-MM-DD", start))?;
                let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
                    .map_err(|_| anyhow!("End date '{}' must look like YYYY-MM-DD", end))?;
                Ok(Period::Custom { start, end })
            }
            _ => Err(anyhow!("Use today, week, month, year or two dates")),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::Custom { .. } => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_revenue: f64,
    pub teacher_payments: f64,
    pub net_profit: f64,
    pub paid_lessons: i64,
    pub cancelled_lessons: i64,
}

impl Statistics {
    /// The payout is `teacher_rate` per paid lesson, whatever the lesson cost.
    pub fn from_prices(paid_prices: &[f64], cancelled_lessons: i64, teacher_rate: f64) -> Self {
        let total_revenue: f64 = paid_prices.iter().sum();
        let paid_lessons = paid_prices.len() as i64;
        let teacher_payments = paid_lessons as f64 * teacher_rate;

        Statistics {
            total_revenue,
            teacher_payments,
            net_profit: total_revenue - teacher_payments,
            paid_lessons,
            cancelled_lessons,
        }
    }
}

pub async fn compute_statistics(
    pool: &SqlitePool,
    start: NaiveDate,
    end: NaiveDate,
    teacher_rate: f64,
) -> Result<Statistics, SchedulerError> {
    let paid_prices =
        LessonInstance::prices_by_status_in_range(pool, LessonStatus::Paid, start, end).await?;
    let cancelled =
        LessonInstance::count_by_status_in_range(pool, LessonStatus::Cancelled, start, end).await?;

    tracing::debug!(
        "Statistics {}..{}: {} paid, {} cancelled",
        start, end, paid_prices.len(), cancelled
    );

    Ok(Statistics::from_prices(&paid_prices, cancelled, teacher_rate))
}
