//! Handlers 模块
//!
//! 每种路由对应的处理程序。处理程序只读取仓库，返回成功负载或
//! `Unauthorized`/`NotFound` 拒绝。

pub mod auth_handler;
pub mod collection_handler;
pub mod write_handler;

use crate::api::request::{Request, RequestPath};
use crate::services::identity::IdentityResolver;
use crate::storage::ResourceStore;

/// 处理程序上下文
pub struct HandlerContext<'a> {
    pub store: &'a ResourceStore,
    pub identities: &'a dyn IdentityResolver,
    pub request: &'a Request,
    pub path: &'a RequestPath,
    /// 路由模板按顺序提取的参数
    pub params: &'a [String],
}

impl HandlerContext<'_> {
    /// 第一个路由参数
    pub fn param(&self) -> &str {
        self.params.first().map(String::as_str).unwrap_or_default()
    }
}
