use std::sync::Arc;

use async_trait::async_trait;

use super::UserRepository;
use crate::database::models::user::{NewUser, UserEntity};
use crate::database::{PgConnector, StorageError};

/// 用户存储库的 Postgres 实现
pub struct PgUserRepository {
    connector: Arc<PgConnector>,
}

impl PgUserRepository {
    pub fn new(connector: Arc<PgConnector>) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> Result<UserEntity, StorageError> {
        let pool = self.connector.pool().await?;

        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(created) => {
                tracing::info!("Created user: {}", created.id);
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Failed to create user: {:?}", e);
                Err(e.into())
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>, StorageError> {
        let pool = self.connector.pool().await?;

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, StorageError> {
        let pool = self.connector.pool().await?;

        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
