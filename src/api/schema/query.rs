use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::session;
use crate::api::models::Record;
use crate::cache::{ReportCache, YearRange};
use crate::error::AppError;

pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    async fn hello(&self, ctx: &Context<'_>) -> String {
        if session(ctx).is_authenticated() {
            "Hello world!".to_string()
        } else {
            "Someone's been a bad boy ;)".to_string()
        }
    }

    /// 导出年份范围内的交通数据 CSV，结果按范围缓存
    async fn get_traffic_data_between_years(
        &self,
        ctx: &Context<'_>,
        from_year: Option<i32>,
        to_year: Option<i32>,
    ) -> Result<Option<Record>> {
        if !session(ctx).is_authenticated() {
            return Err(AppError::NotAuthenticated.extend());
        }

        let cache = ctx.data::<ReportCache>()?;
        let range = YearRange::resolve(from_year, to_year);

        match cache.traffic_report(range).await {
            Ok(record) => Ok(Some(record.into())),
            Err(e) => {
                tracing::error!("Failed to build traffic report: {:?}", e);
                Err(AppError::from(e).extend())
            }
        }
    }

    async fn user_is_logged_in(&self, ctx: &Context<'_>) -> bool {
        session(ctx).is_authenticated()
    }
}
