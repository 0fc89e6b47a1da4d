pub mod record;
pub mod traffic_data;
pub mod user;
