use axum::{
    Router,
    routing::{get, post},
};

use api::schema::{AppSchema, build_schema};
use config::Config;
use database::Database;
use middleware::{cors_layer, log_errors, session_middleware};

pub mod api;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub database: Database,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(config: Config, database: Database) -> Self {
        let schema = build_schema(&config, database.clone());
        Self {
            config,
            database,
            schema,
        }
    }
}

/// 创建应用路由
pub fn create_router(state: AppState) -> Router {
    let graphql_route = if state.config.environment.is_production() {
        post(routes::graphql::graphql_handler)
    } else {
        post(routes::graphql::graphql_handler).get(routes::graphql::graphiql)
    };

    let graphql_routes = Router::new()
        .route("/graphql", graphql_route)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    Router::new()
        .route("/ping", get(routes::health::ping))
        .merge(graphql_routes)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(cors_layer(&state.config))
        .with_state(state)
}
