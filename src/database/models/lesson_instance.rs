use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::LessonTemplate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Scheduled,
    Paid,
    Cancelled,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Scheduled => "scheduled",
            LessonStatus::Paid => "paid",
            LessonStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(LessonStatus::Scheduled),
            "paid" => Ok(LessonStatus::Paid),
            "cancelled" => Ok(LessonStatus::Cancelled),
            other => Err(format!("Unknown lesson status '{other}'")),
        }
    }
}

/// One dated occurrence of a template. Teacher, student, price and time are
/// copied at materialization and never re-synced with the template.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonInstance {
    pub id: String,
    pub lesson_template_id: Option<String>,
    pub date: NaiveDate,
    pub status: LessonStatus,
    pub teacher_id: String,
    pub student_id: String,
    pub price: f64,
    pub time: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Instance joined with its teacher, student and (if it still exists) template.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonInstanceDetails {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub instance: LessonInstance,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
    pub template_day_of_week: Option<i64>,
}

const INSTANCE_COLUMNS: &str =
    "id, lesson_template_id, date, status, teacher_id, student_id, price, time, created_at, updated_at";

impl LessonInstance {
    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        instance_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {INSTANCE_COLUMNS} FROM lesson_instances WHERE id = ?");
        sqlx::query_as::<_, LessonInstance>(&query)
            .bind(instance_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn count_by_date(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lesson_instances WHERE date = ?")
            .bind(date)
            .fetch_one(pool)
            .await
    }

    /// Join-fetch of every instance on `date`, ordered by time.
    pub async fn find_by_date_detailed(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
    ) -> Result<Vec<LessonInstanceDetails>, sqlx::Error> {
        sqlx::query_as::<_, LessonInstanceDetails>(
            r#"
            SELECT li.id, li.lesson_template_id, li.date, li.status, li.teacher_id,
                   li.student_id, li.price, li.time, li.created_at, li.updated_at,
                   t.name AS teacher_name,
                   s.name AS student_name,
                   lt.day_of_week AS template_day_of_week
            FROM lesson_instances li
            LEFT JOIN teachers t ON t.id = li.teacher_id
            LEFT JOIN students s ON s.id = li.student_id
            LEFT JOIN lesson_templates lt ON lt.id = li.lesson_template_id
            WHERE li.date = ?
            ORDER BY li.time, li.created_at
            "#
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }

    /// Inserts one scheduled instance per template in a single statement.
    /// Rows that already exist for the same (template, date) are skipped.
    pub async fn insert_from_templates(
        pool: &sqlx::SqlitePool,
        date: NaiveDate,
        templates: &[LessonTemplate],
    ) -> Result<u64, sqlx::Error> {
        if templates.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().to_rfc3339();
        let placeholders = templates
            .iter()
            .map(|_| "(?, ?, ?, ?, ?, ?, ?, ?, ?, ?)")
            .collect::<Vec<_>>()
            .join(", ");
        let query = format!(
            "INSERT OR IGNORE INTO lesson_instances ({INSTANCE_COLUMNS}) VALUES {placeholders}"
        );

        let mut query_builder = sqlx::query(&query);
        for template in templates {
            query_builder = query_builder
                .bind(Uuid::new_v4().to_string())
                .bind(&template.id)
                .bind(date)
                .bind(LessonStatus::Scheduled)
                .bind(&template.teacher_id)
                .bind(&template.student_id)
                .bind(template.price)
                .bind(&template.time)
                .bind(&now)
                .bind(&now);
        }

        let result = query_builder.execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Sets the status unconditionally and touches `updated_at`.
    pub async fn update_status(
        pool: &sqlx::SqlitePool,
        instance_id: &str,
        status: LessonStatus,
    ) -> Result<Option<Self>, sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        let updated = sqlx::query("UPDATE lesson_instances SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(&now)
            .bind(instance_id)
            .execute(pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, instance_id).await
    }

    pub async fn delete(
        pool: &sqlx::SqlitePool,
        instance_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let deleted = sqlx::query("DELETE FROM lesson_instances WHERE id = ?")
            .bind(instance_id)
            .execute(pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    pub async fn prices_by_status_in_range(
        pool: &sqlx::SqlitePool,
        status: LessonStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT price FROM lesson_instances WHERE status = ? AND date >= ? AND date <= ?"
        )
        .bind(status)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_status_in_range(
        pool: &sqlx::SqlitePool,
        status: LessonStatus,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lesson_instances WHERE status = ? AND date >= ? AND date <= ?"
        )
        .bind(status)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }
}
