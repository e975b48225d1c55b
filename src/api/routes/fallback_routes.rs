//! Fallback Routes
//!
//! 未命中任何具体路由时按方法兜底；写操作一律成功且不修改仓库。

use crate::api::request::Verb;
use crate::api::routes::{RouteKind, RouteTable};

pub fn create_fallback_routes() -> RouteTable {
    RouteTable::new()
        .route(Verb::Get, "/*", RouteKind::Acknowledge)
        .route(Verb::Post, "/*", RouteKind::Create)
        .route(Verb::Put, "/*", RouteKind::Update)
        .route(Verb::Delete, "/*", RouteKind::Remove)
}
