// API 模块
// GraphQL 类型、schema 以及背后的业务操作

pub mod models;
pub mod operations;
pub mod schema;
