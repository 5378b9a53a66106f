use chrono::Utc;
use quiz_core::model::PersistedProgress;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{ProgressRepository, StorageError};

/// Fixed key for the single snapshot: one quiz instance per device/profile.
const PROGRESS_KEY: &str = "quiz-progress";

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn load_progress(&self) -> Result<Option<PersistedProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT value FROM progress WHERE key = ?1
            ",
        )
        .bind(PROGRESS_KEY)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => {
                let raw: String = row.try_get("value").map_err(ser)?;
                let progress = serde_json::from_str(&raw).map_err(ser)?;
                Ok(Some(progress))
            }
            None => Ok(None),
        }
    }

    async fn save_progress(&self, progress: &PersistedProgress) -> Result<(), StorageError> {
        let raw = serde_json::to_string(progress).map_err(ser)?;

        sqlx::query(
            r"
            INSERT INTO progress (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(PROGRESS_KEY)
        .bind(raw)
        .bind(Utc::now())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
