// GraphQL schema
// Query/Mutation 根类型以及 schema 的构建

mod mutation;
mod query;

use async_graphql::{Context, EmptySubscription, Schema};

use crate::cache::ReportCache;
use crate::config::Config;
use crate::database::Database;
use crate::middleware::{RateLimit, Session};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// 构建 schema，存储、报表缓存和配置作为全局数据注入
pub fn build_schema(config: &Config, database: Database) -> AppSchema {
    let mut builder = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(ReportCache::new(&database))
        .data(database)
        .data(config.clone())
        .extension(RateLimit::new(
            config.rate_limit_requests,
            config.rate_limit_window(),
        ))
        .limit_depth(config.query_depth_limit);

    if config.environment.is_production() {
        builder = builder.disable_introspection();
    }

    builder.finish()
}

/// 请求未携带会话时视为未登录
fn session(ctx: &Context<'_>) -> Session {
    ctx.data_opt::<Session>().copied().unwrap_or_default()
}
