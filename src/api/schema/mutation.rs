use async_graphql::{Context, ErrorExtensions, Object, Result};
use axum::http::header::SET_COOKIE;

use super::session;
use crate::api::models::User;
use crate::api::operations::{login_user, register_user};
use crate::config::Config;
use crate::database::{Database, UserEntity};
use crate::error::AppError;
use crate::utils::{generate_token, removal_cookie, session_cookie};

pub struct MutationRoot;

/// 为用户签发令牌并通过 Set-Cookie 下发
fn start_session(ctx: &Context<'_>, user: &UserEntity) -> Result<()> {
    let config = ctx.data::<Config>()?;
    let token = generate_token(user.id, config).map_err(|e| {
        tracing::error!("Failed to sign session token: {}", e);
        AppError::Internal.extend()
    })?;

    ctx.append_http_header(SET_COOKIE, session_cookie(token, config).to_string());
    Ok(())
}

#[Object(name = "Mutation")]
impl MutationRoot {
    /// 已登录时返回 null
    async fn register(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        password: String,
    ) -> Result<Option<User>> {
        if session(ctx).is_authenticated() {
            return Ok(None);
        }

        let database = ctx.data::<Database>()?;
        let user = register_user(database.users.as_ref(), name, email, &password)
            .await
            .map_err(|e| e.extend())?;

        start_session(ctx, &user)?;
        Ok(Some(user.into()))
    }

    /// 已登录时返回 null
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Option<User>> {
        if session(ctx).is_authenticated() {
            return Ok(None);
        }

        let database = ctx.data::<Database>()?;
        let user = login_user(database.users.as_ref(), &email, &password)
            .await
            .map_err(|e| e.extend())?;

        start_session(ctx, &user)?;
        Ok(Some(user.into()))
    }

    async fn logout(&self, ctx: &Context<'_>) -> bool {
        ctx.append_http_header(SET_COOKIE, removal_cookie().to_string());
        true
    }
}
