// 用户实体
// 定义用户相关的数据库实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 用户实体，对应数据库中的 users 表
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    /// 用户ID
    pub id: i32,
    /// 用户名
    pub name: String,
    /// 邮箱，唯一
    pub email: String,
    /// bcrypt 哈希后的密码
    #[serde(skip_serializing)]
    pub password: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
}

/// 创建用户所需的数据，密码已经哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
