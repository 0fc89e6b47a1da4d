use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextResolve, ResolveInfo};
use async_graphql::{ErrorExtensions, PathSegment, ServerResult, Value};
use axum::extract::ConnectInfo;
use axum::http::Request;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;

/// 客户端 IP，主要用于限流
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

/// 依次从 `x-real-ip`、`x-forwarded-for`、连接信息中获取客户端 IP
pub fn client_ip<B>(req: &Request<B>) -> ClientIp {
    let remote_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());

    let ip = req
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            req.headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .or(remote_ip.as_deref())
        .unwrap_or("unknown")
        .trim()
        .to_string();

    ClientIp(ip)
}

/// 限流键：客户端 IP + 操作签名
pub fn rate_limit_key(ip: &str, parent_type: &str, field: &str) -> String {
    format!("{}:{}.{}", ip, parent_type, field)
}

/// 每处理这么多次检查清理一次过期的键
const PRUNE_EVERY: usize = 1024;

/// 顶层 Query/Mutation 字段的限流扩展
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    checks: Arc<AtomicUsize>,
}

impl RateLimit {
    /// 每个键在 `window` 内最多 `requests` 次
    pub fn new(requests: u32, window: Duration) -> Self {
        let burst = NonZeroU32::new(requests).unwrap_or(NonZeroU32::MIN);
        let quota = window
            .checked_div(burst.get())
            .filter(|period| !period.is_zero())
            .and_then(Quota::with_period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            checks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn check(&self, key: &str) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PRUNE_EVERY == PRUNE_EVERY - 1 {
            self.prune();
        }
        self.limiter.check_key(&key.to_string()).is_ok()
    }

    /// 丢弃配额已完全恢复的键，它们与新键没有区别
    pub fn prune(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        tracing::debug!("Rate limiter pruned {} keys", before.saturating_sub(self.limiter.len()));
    }

    /// 当前跟踪的键数量
    pub fn len(&self) -> usize {
        self.limiter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limiter.is_empty()
    }
}

impl ExtensionFactory for RateLimit {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(self.clone())
    }
}

#[async_trait::async_trait]
impl Extension for RateLimit {
    async fn resolve(
        &self,
        ctx: &ExtensionContext<'_>,
        info: ResolveInfo<'_>,
        next: NextResolve<'_>,
    ) -> ServerResult<Option<Value>> {
        if info.path_node.parent.is_none() && !info.is_for_introspection {
            let ip = ctx
                .data_opt::<ClientIp>()
                .map(|ip| ip.0.as_str())
                .unwrap_or("unknown");
            let key = rate_limit_key(ip, info.parent_type, info.name);

            if !self.check(&key) {
                tracing::warn!("Rate limit exceeded: {}", key);
                let path = vec![PathSegment::Field(info.path_node.field_name().to_string())];
                return Err(AppError::RateLimited
                    .extend()
                    .into_server_error(info.field.name.pos)
                    .with_path(path));
            }
        }

        next.run(ctx, info).await
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn real_ip_header_wins() {
        let req = Request::builder()
            .header("x-real-ip", "10.0.0.1")
            .header("x-forwarded-for", "10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), ClientIp("10.0.0.1".into()));
    }

    #[test]
    fn first_forwarded_for_entry_is_used() {
        let req = Request::builder()
            .header("x-forwarded-for", " 203.0.113.9, 10.0.0.2")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&req), ClientIp("203.0.113.9".into()));
    }

    #[test]
    fn falls_back_to_connect_info_then_unknown() {
        let mut req = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&req), ClientIp("unknown".into()));

        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
        assert_eq!(client_ip(&req), ClientIp("127.0.0.1".into()));
    }

    #[test]
    fn limiter_is_keyed_per_ip_and_field() {
        let limit = RateLimit::new(2, Duration::from_secs(60));
        let key = rate_limit_key("1.2.3.4", "Mutation", "login");
        assert_eq!(key, "1.2.3.4:Mutation.login");

        assert!(limit.check(&key));
        assert!(limit.check(&key));
        assert!(!limit.check(&key));

        assert!(limit.check(&rate_limit_key("1.2.3.4", "Mutation", "register")));
        assert!(limit.check(&rate_limit_key("5.6.7.8", "Mutation", "login")));
    }

    #[test]
    fn idle_keys_are_pruned_after_the_window() {
        let limit = RateLimit::new(1, Duration::from_millis(50));
        for i in 0..500 {
            limit.check(&rate_limit_key(&format!("10.0.{}.{}", i / 256, i % 256), "Query", "hello"));
        }
        assert_eq!(limit.len(), 500);

        std::thread::sleep(Duration::from_millis(120));
        limit.prune();
        assert!(limit.is_empty());
    }

    #[test]
    fn rotating_ips_do_not_grow_the_limiter_forever() {
        let limit = RateLimit::new(1, Duration::from_millis(10));
        for i in 0..PRUNE_EVERY - 1 {
            limit.check(&rate_limit_key(&format!("spoofed-{}", i), "Query", "hello"));
        }
        assert_eq!(limit.len(), PRUNE_EVERY - 1);

        std::thread::sleep(Duration::from_millis(50));
        // 第 PRUNE_EVERY 次检查先清理，再记录自己的键
        limit.check(&rate_limit_key("fresh", "Query", "hello"));
        assert_eq!(limit.len(), 1);
    }
}
