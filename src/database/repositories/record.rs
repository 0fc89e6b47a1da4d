use std::sync::Arc;

use async_trait::async_trait;

use super::RecordRepository;
use crate::database::models::record::{NewRecord, RecordEntity};
use crate::database::{PgConnector, StorageError};

/// 记录存储库的 Postgres 实现
pub struct PgRecordRepository {
    connector: Arc<PgConnector>,
}

impl PgRecordRepository {
    pub fn new(connector: Arc<PgConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl RecordRepository for PgRecordRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<RecordEntity>, StorageError> {
        let pool = self.connector.pool().await?;

        let record = sqlx::query_as::<_, RecordEntity>(
            r#"
            SELECT id, key, data, created_at, updated_at
            FROM records
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    async fn create_if_absent(&self, record: NewRecord) -> Result<RecordEntity, StorageError> {
        let pool = self.connector.pool().await?;

        // key 上有唯一约束，并发插入时只有一行成功
        let inserted = sqlx::query_as::<_, RecordEntity>(
            r#"
            INSERT INTO records (key, data)
            VALUES ($1, $2)
            ON CONFLICT (key) DO NOTHING
            RETURNING id, key, data, created_at, updated_at
            "#,
        )
        .bind(&record.key)
        .bind(&record.data)
        .fetch_optional(pool)
        .await?;

        if let Some(created) = inserted {
            return Ok(created);
        }

        tracing::debug!("Record {} was inserted concurrently, reusing it", record.key);
        let existing = sqlx::query_as::<_, RecordEntity>(
            r#"
            SELECT id, key, data, created_at, updated_at
            FROM records
            WHERE key = $1
            "#,
        )
        .bind(&record.key)
        .fetch_one(pool)
        .await?;

        Ok(existing)
    }
}
