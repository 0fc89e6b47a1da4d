use std::env;
use std::time::Duration;

/// 会话有效期上限（一年）
pub const MAX_JWT_EXPIRATION_SECS: u64 = 365 * 24 * 3600;

/// 运行环境
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Production,
    Localhost,
    Test,
}

impl AppEnvironment {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "test" => AppEnvironment::Test,
            "localhost" | "local" | "development" => AppEnvironment::Localhost,
            _ => AppEnvironment::Production,
        }
    }

    pub fn is_test(self) -> bool {
        self == AppEnvironment::Test
    }

    pub fn is_production(self) -> bool {
        self == AppEnvironment::Production
    }
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub environment: AppEnvironment,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub allowed_origins: Vec<String>,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u32,
    pub query_depth_limit: usize,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Config {
    /// 使用默认值构建配置，只需要数据库地址和签名密钥
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Config {
            environment: AppEnvironment::Production,
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_secs: 3600,
            allowed_origins: Vec::new(),
            server_host: "::".to_string(),
            server_port: 3000,
            rate_limit_window_secs: 60,
            rate_limit_requests: 100,
            query_depth_limit: 7,
            db_max_connections: 2,
            db_acquire_timeout_secs: 3,
        }
    }

    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let environment = env_trimmed("APP_ENV")
            .map(|v| AppEnvironment::parse(&v))
            .unwrap_or(AppEnvironment::Production);

        // 测试环境使用独立的数据库
        let database_url = if environment.is_test() {
            required("DATABASE_URL_TEST")?
        } else {
            required("DATABASE_URL")?
        };

        let mut config = Config::new(database_url, required("APP_SECRET")?);
        config.environment = environment;

        if let Some(secs) = env_trimmed("JWT_EXPIRATION").and_then(|v| parse_jwt_expiration(&v)) {
            config.jwt_expiration_secs = secs;
        }
        config.allowed_origins = parse_origins(env_trimmed("ALLOWED_ORIGINS").as_deref());
        if let Some(host) = env_trimmed("SERVER_HOST") {
            config.server_host = host;
        }
        config.server_port = parsed_or("SERVER_PORT", config.server_port);
        config.rate_limit_window_secs = parsed_or("RATE_LIMIT_WINDOW", config.rate_limit_window_secs);
        config.rate_limit_requests = parsed_or("RATE_LIMIT_REQUESTS", config.rate_limit_requests);
        config.query_depth_limit = parsed_or("QUERY_DEPTH_LIMIT", config.query_depth_limit);
        config.db_max_connections = parsed_or("DB_MAX_CONNECTIONS", config.db_max_connections);
        config.db_acquire_timeout_secs =
            parsed_or("DB_ACQUIRE_TIMEOUT", config.db_acquire_timeout_secs);

        Ok(config)
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs.min(MAX_JWT_EXPIRATION_SECS))
    }

    /// 令牌和 cookie 使用的有效期秒数，不超过上限
    pub fn session_ttl_secs(&self) -> i64 {
        // 上限远小于 i64::MAX
        self.jwt_expiration().as_secs() as i64
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    /// 本地和测试环境，或者白名单为空/包含 `*` 时，允许所有来源
    pub fn allows_any_origin(&self) -> bool {
        !self.environment.is_production()
            || self.allowed_origins.is_empty()
            || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn env_trimmed(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str) -> Result<String, env::VarError> {
    env_trimmed(key).ok_or(env::VarError::NotPresent)
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env_trimmed(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// 解析 `JWT_EXPIRATION`（小时，可带 `h` 后缀），结果截断到上限
fn parse_jwt_expiration(raw: &str) -> Option<u64> {
    let hours = raw.trim_end_matches('h').parse::<u64>().ok()?;
    let secs = hours.checked_mul(3600).unwrap_or(u64::MAX);
    if secs > MAX_JWT_EXPIRATION_SECS {
        tracing::warn!("JWT_EXPIRATION {} exceeds the maximum, using one year", raw);
    }
    Some(secs.min(MAX_JWT_EXPIRATION_SECS))
}

/// 解析 `ALLOWED_ORIGINS`，未设置或为 `*` 时返回空列表
pub fn parse_origins(raw: Option<&str>) -> Vec<String> {
    match raw.map(str::trim) {
        None | Some("") | Some("*") => Vec::new(),
        Some(list) => list
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect(),
    }
}
