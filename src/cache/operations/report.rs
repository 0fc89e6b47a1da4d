use std::sync::Arc;

use crate::cache::export::traffic_data_to_csv;
use crate::cache::keys::{YearRange, traffic_report_key};
use crate::cache::locks::KeyedLocks;
use crate::cache::CacheError;
use crate::database::{Database, NewRecord, RecordEntity, RecordRepository, TrafficDataRepository};

/// 交通报表缓存
///
/// 先按年份范围生成的 key 查找已有记录，命中直接返回；
/// 未命中时查询交通数据、导出 CSV 并保存为新记录。
/// 同一进程内同一个 key 同时只会计算一次。
#[derive(Clone)]
pub struct ReportCache {
    records: Arc<dyn RecordRepository>,
    traffic_data: Arc<dyn TrafficDataRepository>,
    locks: KeyedLocks,
}

impl ReportCache {
    pub fn new(database: &Database) -> Self {
        Self {
            records: database.records.clone(),
            traffic_data: database.traffic_data.clone(),
            locks: KeyedLocks::new(),
        }
    }

    pub async fn traffic_report(&self, range: YearRange) -> Result<RecordEntity, CacheError> {
        let key = traffic_report_key(&range);

        if let Some(record) = self.records.find_by_key(&key).await? {
            tracing::debug!("Report cache hit: {}", key);
            return Ok(record);
        }

        let _guard = self.locks.lock(&key).await;

        // 等锁期间可能已经有人生成了
        if let Some(record) = self.records.find_by_key(&key).await? {
            tracing::debug!("Report generated while waiting: {}", key);
            return Ok(record);
        }

        tracing::info!("Report cache miss, generating {}", key);
        let rows = self
            .traffic_data
            .find_between_years(range.from_year, range.to_year)
            .await?;
        let data = traffic_data_to_csv(&rows)?;

        let record = self
            .records
            .create_if_absent(NewRecord { key, data })
            .await?;
        tracing::info!(
            "Stored report {} ({} rows) as record {}",
            record.key,
            rows.len(),
            record.id
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{MemoryStore, TrafficDataEntity};

    fn store() -> Arc<MemoryStore> {
        let rows = (2015..=2021)
            .map(|year| TrafficDataEntity {
                id: year - 2014,
                count_point_id: Some(900 + year),
                year: Some(year),
                road_name: Some("M5".into()),
                ..Default::default()
            })
            .collect();
        Arc::new(MemoryStore::with_traffic_data(rows))
    }

    #[tokio::test]
    async fn miss_computes_and_hit_reuses() {
        let store = store();
        let cache = ReportCache::new(&Database::in_memory(store.clone()));

        let first = cache
            .traffic_report(YearRange::new(2016, 2020))
            .await
            .unwrap();
        let second = cache
            .traffic_report(YearRange::new(2016, 2020))
            .await
            .unwrap();

        assert_eq!(first.key, "traffic-data-2016-2020.csv");
        assert_eq!(first.id, second.id);
        assert_eq!(first.data, second.data);
        assert_eq!(store.traffic_queries(), 1);

        // 表头 + 2016..=2020 五行
        let data = first.data.unwrap();
        assert_eq!(data.lines().count(), 6);
        assert!(!data.contains(",2015,"));
        assert!(!data.contains(",2021,"));
    }

    #[tokio::test]
    async fn different_ranges_get_separate_records() {
        let store = store();
        let cache = ReportCache::new(&Database::in_memory(store.clone()));

        let a = cache.traffic_report(YearRange::new(2016, 2020)).await.unwrap();
        let b = cache.traffic_report(YearRange::new(2017, 2020)).await.unwrap();

        assert_ne!(a.key, b.key);
        assert_ne!(a.id, b.id);
        assert_eq!(store.record_count(), 2);
    }

    #[tokio::test]
    async fn inverted_range_caches_header_only_report() {
        let store = store();
        let cache = ReportCache::new(&Database::in_memory(store));

        let record = cache
            .traffic_report(YearRange::new(2020, 2016))
            .await
            .unwrap();
        assert_eq!(record.data.unwrap().lines().count(), 1);
    }

    #[tokio::test]
    async fn concurrent_misses_compute_once() {
        let store = store();
        let cache = ReportCache::new(&Database::in_memory(store.clone()));

        let tasks: Vec<_> = (0..10)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.traffic_report(YearRange::new(2016, 2020)).await })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }

        assert!(ids.iter().all(|id| *id == ids[0]));
        assert_eq!(store.traffic_queries(), 1);
        assert_eq!(store.record_count(), 1);
    }
}
