use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// 会话 cookie 名称
pub const SESSION_COOKIE: &str = "sessionToken";

/// 交互式登录使用的 bcrypt 成本
pub const PASSWORD_HASH_COST: u32 = 8;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), PASSWORD_HASH_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub exp: i64, // 过期时间
    pub iat: i64, // 签发时间
}

pub fn generate_token(user_id: i32, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let ttl = Duration::seconds(config.session_ttl_secs());
    let expiration = now.checked_add_signed(ttl).unwrap_or(now).timestamp();

    let claims = Claims {
        user_id,
        exp: expiration,
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// 携带会话令牌的 cookie，跨站可发送，仅 HTTP 可读
pub fn session_cookie(token: String, config: &Config) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(cookie::time::Duration::seconds(config.session_ttl_secs()))
        .build()
}

/// 让客户端删除会话 cookie
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .build();
    cookie.make_removal();
    cookie
}

pub mod error_codes {
    pub const NO_AUTH: &str = "NO_AUTH";
    pub const REG_FAIL: &str = "REG_FAIL";
    pub const NO_USER: &str = "NO_USER";
    pub const WRONG_PASS: &str = "WRONG_PASS";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_SERVER_ERROR";
}
