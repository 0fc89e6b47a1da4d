use std::str::FromStr;
use std::time::Duration;

use sqlx::Executor;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use tokio::sync::OnceCell;

use crate::config::Config;
use crate::database::StorageError;

static MIGRATOR: Migrator = sqlx::migrate!();

/// 连接池访问器
///
/// 连接池在第一次使用时创建并执行迁移，之后在进程内复用。
/// 初始化失败时不保存任何状态，下一次调用会重新尝试连接。
pub struct PgConnector {
    connect_options: PgConnectOptions,
    pool_options: PgPoolOptions,
    reset_tables: bool,
    pool: OnceCell<PgPool>,
}

impl PgConnector {
    pub fn new(config: &Config) -> Result<Self, StorageError> {
        let mut connect_options =
            PgConnectOptions::from_str(&config.database_url).map_err(StorageError::Connection)?;
        if !config.environment.is_test() {
            connect_options = connect_options.ssl_mode(PgSslMode::Require);
        }

        let pool_options = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .min_connections(0)
            // 空闲连接尽快回收
            .idle_timeout(Duration::from_secs(1))
            .acquire_timeout(config.db_acquire_timeout())
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute("SET application_name = 'traffic_report_api';")
                        .await?;
                    Ok(())
                })
            });

        Ok(PgConnector {
            connect_options,
            pool_options,
            reset_tables: config.environment.is_test(),
            pool: OnceCell::new(),
        })
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    pub async fn pool(&self) -> Result<&PgPool, StorageError> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<PgPool, StorageError> {
        let pool = self
            .pool_options
            .clone()
            .connect_with(self.connect_options.clone())
            .await
            .map_err(|e| {
                tracing::error!("Unable to connect to the database: {:?}", e);
                StorageError::Connection(e)
            })?;

        if let Err(e) = MIGRATOR.run(&pool).await {
            tracing::error!("Failed to migrate the database: {:?}", e);
            pool.close().await;
            return Err(e.into());
        }

        // 测试环境每次建立连接时清空可写表
        if self.reset_tables {
            sqlx::query("TRUNCATE users, records RESTART IDENTITY")
                .execute(&pool)
                .await?;
        }

        tracing::info!("Database connection established");
        Ok(pool)
    }
}
