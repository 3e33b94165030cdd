use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

impl Teacher {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        name: &str,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let name = name.trim().to_string();

        sqlx::query("INSERT INTO teachers (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&name)
            .bind(&now)
            .execute(pool)
            .await?;

        Ok(Teacher {
            id,
            name,
            created_at: now,
        })
    }

    pub async fn find_all(pool: &sqlx::SqlitePool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, name, created_at FROM teachers ORDER BY name"
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &sqlx::SqlitePool,
        teacher_id: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(
            "SELECT id, name, created_at FROM teachers WHERE id = ?"
        )
        .bind(teacher_id)
        .fetch_optional(pool)
        .await
    }

    /// Case-insensitive lookup used when the operator types a name instead of an id.
    /// SQLite's `lower()` only folds ASCII, so names are compared here.
    pub async fn find_by_name(
        pool: &sqlx::SqlitePool,
        name: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let wanted = name.trim().to_lowercase();
        let found = Self::find_all(pool)
            .await?
            .into_iter()
            .find(|t| t.name.to_lowercase() == wanted);
        Ok(found)
    }

    /// Deletes the teacher together with every template and instance that
    /// references it. Returns false when no teacher row matched.
    pub async fn delete_cascade(
        pool: &sqlx::SqlitePool,
        teacher_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM lesson_instances WHERE teacher_id = ?")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM lesson_templates WHERE teacher_id = ?")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM teachers WHERE id = ?")
            .bind(teacher_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}
