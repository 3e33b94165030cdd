use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A recurring weekly slot. `day_of_week` uses 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonTemplate {
    pub id: String,
    pub teacher_id: String,
    pub student_id: String,
    pub day_of_week: i64,
    pub time: String, // HH:MM
    pub price: f64,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewLessonTemplate {
    pub teacher_id: String,
    pub student_id: String,
    pub day_of_week: i64,
    pub time: String,
    pub price: f64,
}

/// Template row joined with the names of the people it refers to.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LessonTemplateDetails {
    pub id: String,
    pub day_of_week: i64,
    pub time: String,
    pub price: f64,
    pub teacher_name: Option<String>,
    pub student_name: Option<String>,
}

impl LessonTemplate {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        new_template: NewLessonTemplate,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO lesson_templates (id, teacher_id, student_id, day_of_week, time, price, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&id)
        .bind(&new_template.teacher_id)
        .bind(&new_template.student_id)
        .bind(new_template.day_of_week)
        .bind(&new_template.time)
        .bind(new_template.price)
        .bind(&now)
        .execute(pool)
        .await?;

        Ok(LessonTemplate {
            id,
            teacher_id: new_template.teacher_id,
            student_id: new_template.student_id,
            day_of_week: new_template.day_of_week,
            time: new_template.time,
            price: new_template.price,
            created_at: now,
        })
    }

    pub async fn find_by_day_of_week(
        pool: &sqlx::SqlitePool,
        day_of_week: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, LessonTemplate>(
            "SELECT id, teacher_id, student_id, day_of_week, time, price, created_at FROM lesson_templates WHERE day_of_week = ? ORDER BY time"
        )
        .bind(day_of_week)
        .fetch_all(pool)
        .await
    }

    pub async fn find_all_detailed(
        pool: &sqlx::SqlitePool,
    ) -> Result<Vec<LessonTemplateDetails>, sqlx::Error> {
        sqlx::query_as::<_, LessonTemplateDetails>(
            r#"
            SELECT lt.id, lt.day_of_week, lt.time, lt.price,
                   t.name AS teacher_name, s.name AS student_name
            FROM lesson_templates lt
            LEFT JOIN teachers t ON t.id = lt.teacher_id
            LEFT JOIN students s ON s.id = lt.student_id
            ORDER BY lt.day_of_week, lt.time
            "#
        )
        .fetch_all(pool)
        .await
    }
}
