use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    AppState,
    middleware::rate_limit::client_ip,
    utils::{SESSION_COOKIE, verify_token},
};

/// 当前请求的认证状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<i32>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: i32) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        self.user_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// 解析会话 cookie：令牌签名有效、未过期且用户仍然存在才算已登录。
/// 任何失败都按未登录处理，不向调用方报错。
pub async fn resolve_session(state: &AppState, token: &str) -> Session {
    let claims = match verify_token(token, &state.config) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Incoming session token invalid: {}", e);
            return Session::anonymous();
        }
    };

    match state.database.users.find_by_id(claims.user_id).await {
        Ok(Some(user)) => Session::authenticated(user.id),
        Ok(None) => {
            tracing::warn!("Session token refers to unknown user {}", claims.user_id);
            Session::anonymous()
        }
        Err(e) => {
            tracing::error!("Failed to look up session user: {:?}", e);
            Session::anonymous()
        }
    }
}

pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let session = match jar.get(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => resolve_session(&state, cookie.value()).await,
        _ => Session::anonymous(),
    };
    tracing::debug!("Session resolved, authenticated: {}", session.is_authenticated());

    let ip = client_ip(&req);
    req.extensions_mut().insert(session);
    req.extensions_mut().insert(ip);

    next.run(req).await
}
