// 数据库模块
// 包含数据库实体定义、连接管理和存储库实现

pub mod connector; // 连接池的惰性初始化
pub mod memory; // 内存实现，用于测试和本地开发
pub mod models; // 数据库实体定义
pub mod repositories; // 存储库接口和 Postgres 实现

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;

pub use connector::PgConnector;
pub use memory::MemoryStore;
pub use models::record::{NewRecord, RecordEntity};
pub use models::traffic_data::{TRAFFIC_DATA_COLUMNS, TrafficDataEntity};
pub use models::user::{NewUser, UserEntity};
pub use repositories::{
    PgRecordRepository, PgTrafficDataRepository, PgUserRepository, RecordRepository,
    TrafficDataRepository, UserRepository,
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unable to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("database error: {0}")]
    Query(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::UniqueViolation,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::Connection(err)
            }
            _ => StorageError::Query(err),
        }
    }
}

/// 各实体存储库的集合，通过应用状态注入
#[derive(Clone)]
pub struct Database {
    pub users: Arc<dyn UserRepository>,
    pub records: Arc<dyn RecordRepository>,
    pub traffic_data: Arc<dyn TrafficDataRepository>,
}

impl Database {
    /// Postgres 存储，连接在第一次使用时建立
    pub fn postgres(config: &Config) -> Result<Self, StorageError> {
        let connector = Arc::new(PgConnector::new(config)?);
        Ok(Database {
            users: Arc::new(PgUserRepository::new(connector.clone())),
            records: Arc::new(PgRecordRepository::new(connector.clone())),
            traffic_data: Arc::new(PgTrafficDataRepository::new(connector)),
        })
    }

    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Database {
            users: store.clone(),
            records: store.clone(),
            traffic_data: store,
        }
    }
}
