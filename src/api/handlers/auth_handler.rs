//! Auth Handlers
//!
//! 登录、注册与当前用户。

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::dto::{LoginRequest, LoginResponse, MessageResponse, REGISTRATION_SUCCESSFUL};
use crate::api::handlers::HandlerContext;
use crate::error::{AppError, Result};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const UNAUTHORIZED: &str = "Unauthorized";

/// 校验凭据并签发令牌
///
/// POST /auth/login
pub fn login(ctx: &HandlerContext<'_>) -> Result<Value> {
    let credentials: LoginRequest = ctx
        .request
        .body
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let login = credentials
        .login()
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let identity = ctx
        .store
        .authenticate(login, &credentials.password)
        .ok_or_else(|| {
            warn!("Login rejected for: {}", login);
            AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
        })?;

    info!("Login accepted for user: {}", identity.id);

    let response = LoginResponse {
        token: ctx.identities.mint(identity),
        user: identity.clone(),
    };
    Ok(serde_json::to_value(response)?)
}

/// 注册永远成功，不修改仓库
///
/// POST /auth/register
pub fn register(_ctx: &HandlerContext<'_>) -> Result<Value> {
    debug!("Acknowledging registration");
    Ok(serde_json::to_value(MessageResponse::new(REGISTRATION_SUCCESSFUL))?)
}

/// 令牌对应的身份
///
/// GET /users/me
pub async fn current_user(ctx: &HandlerContext<'_>) -> Result<Value> {
    let token = ctx
        .request
        .bearer()
        .ok_or_else(|| AppError::Unauthorized(UNAUTHORIZED.to_string()))?;

    let identity = ctx.identities.identity_for(token).await?;
    Ok(serde_json::to_value(identity)?)
}
