// 内存存储
// 与 Postgres 实现保持相同的约束：邮箱唯一、记录 key 唯一

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use crate::database::StorageError;
use crate::database::models::record::{NewRecord, RecordEntity};
use crate::database::models::traffic_data::TrafficDataEntity;
use crate::database::models::user::{NewUser, UserEntity};
use crate::database::repositories::{RecordRepository, TrafficDataRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: Vec<UserEntity>,
    records: Vec<RecordEntity>,
    traffic_data: Vec<TrafficDataEntity>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    traffic_queries: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_traffic_data(rows: Vec<TrafficDataEntity>) -> Self {
        let store = Self::default();
        store.tables().traffic_data = rows;
        store
    }

    /// 交通数据被查询的次数
    pub fn traffic_queries(&self) -> usize {
        self.traffic_queries.load(Ordering::SeqCst)
    }

    pub fn record_count(&self) -> usize {
        self.tables().records.len()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: NewUser) -> Result<UserEntity, StorageError> {
        let mut tables = self.tables();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StorageError::UniqueViolation);
        }

        let now = Utc::now();
        let created = UserEntity {
            id: next_id(tables.users.len()),
            name: user.name,
            email: user.email,
            password: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>, StorageError> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, StorageError> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[async_trait]
impl RecordRepository for MemoryStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<RecordEntity>, StorageError> {
        Ok(self
            .tables()
            .records
            .iter()
            .find(|r| r.key == key)
            .cloned())
    }

    async fn create_if_absent(&self, record: NewRecord) -> Result<RecordEntity, StorageError> {
        let mut tables = self.tables();
        if let Some(existing) = tables.records.iter().find(|r| r.key == record.key) {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let created = RecordEntity {
            id: next_id(tables.records.len()),
            key: record.key,
            data: Some(record.data),
            created_at: now,
            updated_at: now,
        };
        tables.records.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl TrafficDataRepository for MemoryStore {
    async fn find_between_years(
        &self,
        from_year: i32,
        to_year: i32,
    ) -> Result<Vec<TrafficDataEntity>, StorageError> {
        self.traffic_queries.fetch_add(1, Ordering::SeqCst);

        let mut rows: Vec<TrafficDataEntity> = self
            .tables()
            .traffic_data
            .iter()
            .filter(|row| row.year.is_some_and(|y| y >= from_year && y <= to_year))
            .cloned()
            .collect();
        rows.sort_by_key(|row| row.id);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test Account".into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        let first = store.create(new_user("a@example.com")).await.unwrap();
        assert_eq!(first.id, 1);

        let err = store.create(new_user("a@example.com")).await.unwrap_err();
        assert!(matches!(err, StorageError::UniqueViolation));

        let found = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
        assert!(store.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn record_insert_keeps_first_value_for_key() {
        let store = MemoryStore::new();
        let first = store
            .create_if_absent(NewRecord {
                key: "k".into(),
                data: "one".into(),
            })
            .await
            .unwrap();
        let second = store
            .create_if_absent(NewRecord {
                key: "k".into(),
                data: "two".into(),
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.data.as_deref(), Some("one"));
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn year_filter_is_inclusive_on_both_bounds() {
        let rows = (2014..=2022)
            .map(|year| TrafficDataEntity {
                id: year - 2013,
                year: Some(year),
                ..Default::default()
            })
            .collect();
        let store = MemoryStore::with_traffic_data(rows);

        let years: Vec<_> = store
            .find_between_years(2016, 2020)
            .await
            .unwrap()
            .into_iter()
            .filter_map(|row| row.year)
            .collect();
        assert_eq!(years, vec![2016, 2017, 2018, 2019, 2020]);
        assert_eq!(store.traffic_queries(), 1);
    }
}
