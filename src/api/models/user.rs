use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};

use crate::database::UserEntity;

/// 对外暴露的用户信息，不包含密码
#[derive(Debug, Clone, SimpleObject)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            created_at: Some(entity.created_at),
            updated_at: Some(entity.updated_at),
        }
    }
}
