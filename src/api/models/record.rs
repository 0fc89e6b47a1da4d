use async_graphql::{Json, SimpleObject};
use chrono::{DateTime, Utc};

use crate::database::RecordEntity;

/// 缓存的报表记录，`data` 以 JSON 标量返回 CSV 文本
#[derive(Debug, Clone, SimpleObject)]
pub struct Record {
    pub id: i32,
    pub key: String,
    pub data: Option<Json<String>>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<RecordEntity> for Record {
    fn from(entity: RecordEntity) -> Self {
        Self {
            id: entity.id,
            key: entity.key,
            data: entity.data.map(Json),
            updated_at: entity.updated_at,
            created_at: entity.created_at,
        }
    }
}
