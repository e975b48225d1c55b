//! Auth Routes
//!
//! 登录、注册与身份相关路由，优先级最高。

use crate::api::request::Verb;
use crate::api::routes::{RouteKind, RouteTable};

/// 创建认证路由
pub fn create_auth_routes() -> RouteTable {
    RouteTable::new()
        .route(Verb::Post, "/auth/login", RouteKind::Login)
        .route(Verb::Post, "/auth/register", RouteKind::Register)
        .route(Verb::Get, "/users/me", RouteKind::CurrentUser)
        .route(Verb::Get, "/users/{user_id}/tokens", RouteKind::UserWallet)
}
