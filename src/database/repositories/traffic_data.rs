use std::sync::Arc;

use async_trait::async_trait;

use super::TrafficDataRepository;
use crate::database::models::traffic_data::TrafficDataEntity;
use crate::database::{PgConnector, StorageError};

pub struct PgTrafficDataRepository {
    connector: Arc<PgConnector>,
}

impl PgTrafficDataRepository {
    pub fn new(connector: Arc<PgConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl TrafficDataRepository for PgTrafficDataRepository {
    async fn find_between_years(
        &self,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<TrafficDataEntity>, StorageError> {
        let pool = self.connector.pool().await?;

        let rows = sqlx::query_as::<_, TrafficDataEntity>(
            r#"
            SELECT *
            FROM traffic_data
            WHERE year >= $1 AND year <= $2
            ORDER BY id
            "#,
        )
        .bind(from_year)
        .bind(to_year)
        .fetch_all(pool)
        .await?;

        tracing::debug!(
            "Loaded {} traffic rows for {}-{}",
            rows.len(),
            from_year,
            to_year
        );
        Ok(rows)
    }
}
