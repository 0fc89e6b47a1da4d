mod auth;
mod cors;
mod error_handler;
mod rate_limit;

pub use auth::{Session, resolve_session, session_middleware};
pub use cors::cors_layer;
pub use error_handler::log_errors;
pub use rate_limit::{ClientIp, RateLimit, client_ip};
