use axum::{Json, response::IntoResponse};
use serde::Serialize;

/// Ping响应
#[derive(Serialize)]
pub struct PingResponse {
    /// 服务状态
    pub status: String,
    /// 服务器时间
    pub timestamp: i64,
}

/// 健康检查接口，不访问数据库
pub async fn ping() -> impl IntoResponse {
    Json(PingResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}
