// 存储库接口
// 每个实体一个 trait，Postgres 和内存实现共用同一套语义

mod record;
mod traffic_data;
mod user;

use async_trait::async_trait;

use crate::database::StorageError;
use crate::database::models::record::{NewRecord, RecordEntity};
use crate::database::models::traffic_data::TrafficDataEntity;
use crate::database::models::user::{NewUser, UserEntity};

pub use record::PgRecordRepository;
pub use traffic_data::PgTrafficDataRepository;
pub use user::PgUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户，邮箱重复时返回 `StorageError::UniqueViolation`
    async fn create(&self, user: NewUser) -> Result<UserEntity, StorageError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>, StorageError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, StorageError>;
}

#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<RecordEntity>, StorageError>;

    /// 插入记录；同一 key 已存在时不覆盖，返回已存在的那一行
    async fn create_if_absent(&self, record: NewRecord) -> Result<RecordEntity, StorageError>;
}

#[async_trait]
pub trait TrafficDataRepository: Send + Sync {
    /// 年份在 `[from_year, to_year]` 内的所有行，按 id 排序
    async fn find_between_years(
        &self,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<TrafficDataEntity>, StorageError>;
}
