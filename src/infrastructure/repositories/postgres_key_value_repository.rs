use super::key_value_repository::KeyValueRepository;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// PostgreSQL-backed key-value store (table `kv_store`)
pub struct PostgresKeyValueRepository {
    pool: Arc<DbPool>,
}

impl PostgresKeyValueRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist yet
    pub async fn ensure_schema(&self) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueRepository for PostgresKeyValueRepository {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let pool = self.pool.as_ref();
        let value = sqlx::query_scalar::<_, String>(
            r#"
            SELECT value
            FROM kv_store
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (key)
            DO UPDATE SET
                value = EXCLUDED.value,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        crate::infrastructure::db::check_connection(self.pool.as_ref()).await?;
        Ok(())
    }
}
