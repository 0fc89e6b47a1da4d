// 记录实体
// 缓存的计算结果，按 key 寻址

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 记录实体，对应数据库中的 records 表
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecordEntity {
    /// 记录ID
    pub id: i32,
    /// 由查询参数确定的缓存键
    pub key: String,
    /// 缓存内容（CSV 文本）
    pub data: Option<String>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRecord {
    pub key: String,
    pub data: String,
}
