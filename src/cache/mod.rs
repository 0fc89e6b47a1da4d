// 缓存模块
// 报表的缓存键、CSV 导出以及先查缓存再计算的逻辑

pub mod export;
pub mod keys;
pub mod locks;
pub mod operations;

use thiserror::Error;

use crate::database::StorageError;

pub use keys::{YearRange, traffic_report_key};
pub use operations::report::ReportCache;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to export report: {0}")]
    Export(#[from] csv::Error),
}
