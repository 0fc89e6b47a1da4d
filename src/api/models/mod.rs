// GraphQL 输出类型

pub mod record;
pub mod user;

pub use record::Record;
pub use user::User;
