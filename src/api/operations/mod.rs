// 业务操作
// 与 GraphQL 解耦，便于单独测试

pub mod user;

pub use user::{login_user, register_user};
