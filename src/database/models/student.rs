use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Student {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        name: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let name = name.trim().to_string();

        sqlx::query("INSERT INTO students (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&name)
            .bind(&now)
            .execute(pool)
            .await?;

        Ok(Student {
            id,
            name,
            created_at: now,
        })
    }

    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, created_at FROM students ORDER BY name"
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        student_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            "SELECT id, name, created_at FROM students WHERE id = ?"
        )
        .bind(student_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_name(
        pool: &sqlx::SqlitePool,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let wanted = name.trim().to_lowercase();
        Ok(Self::find_all(pool)
            .await?
            .into_iter()
            .find(|s| s.name.to_lowercase() == wanted))
    }

    /// Deletes the student together with every template and instance that
    /// references it. Returns false when no student row matched.
    pub async fn delete_cascade(
        pool: &sqlx::SqlitePool,
        student_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM lesson_instances WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM lesson_templates WHERE student_id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(student_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}
