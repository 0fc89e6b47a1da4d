use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::{Extension, State},
    response::{Html, IntoResponse},
};

use crate::{
    AppState,
    middleware::{ClientIp, Session},
};

/// 执行 GraphQL 操作，会话和客户端 IP 由中间件注入
#[axum::debug_handler]
pub async fn graphql_handler(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Extension(ip): Extension<ClientIp>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(session).data(ip);
    state.schema.execute(request).await.into()
}

/// 非生产环境提供 GraphiQL 页面
pub async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
