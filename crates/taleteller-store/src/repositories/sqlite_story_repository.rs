//! `SQLite` implementation of the `StoryRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use taleteller_core::{NewStory, RepositoryError, Story, StoryRepository};

/// `SQLite` implementation of the `StoryRepository` trait.
pub struct SqliteStoryRepository {
    pool: SqlitePool,
}

impl SqliteStoryRepository {
    /// Create a new `SQLite` story repository.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

fn row_to_story(row: &SqliteRow) -> Result<Story, RepositoryError> {
    let created_at: String = row.try_get("created_at").map_err(storage_error)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| RepositoryError::Serialization(format!("created_at '{created_at}': {e}")))?
        .with_timezone(&Utc);

    Ok(Story {
        id: row.try_get("id").map_err(storage_error)?,
        title: row.try_get("title").map_err(storage_error)?,
        prompt: row.try_get("prompt").map_err(storage_error)?,
        text: row.try_get("text").map_err(storage_error)?,
        created_at,
    })
}

#[async_trait]
impl StoryRepository for SqliteStoryRepository {
    async fn insert(&self, story: &NewStory) -> Result<Story, RepositoryError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO stories (title, prompt, text, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&story.title)
        .bind(&story.prompt)
        .bind(&story.text)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, title = %story.title, "Stored story");

        Ok(story.clone().into_story(id, created_at))
    }

    async fn get_by_id(&self, id: i64) -> Result<Story, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, title, prompt, text, created_at FROM stories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?
        .ok_or_else(|| RepositoryError::NotFound(format!("story {id}")))?;

        row_to_story(&row)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("story {id}")));
        }

        Ok(())
    }
}
