//! Collection Handlers
//!
//! 集合列表、单条查找、过滤、分页与用户钱包。

use serde_json::Value;
use tracing::debug;

use crate::api::handlers::HandlerContext;
use crate::api::routes::FilterRoute;
use crate::error::{AppError, Result};
use crate::storage::{CollectionName, Filter, Pagination};

const RESOURCE_NOT_FOUND: &str = "Resource not found";

/// GET /{collection}
pub fn full_list(ctx: &HandlerContext<'_>, collection: CollectionName) -> Result<Value> {
    ctx.store.view(collection).list()
}

/// GET /{collection}/{id}
pub fn entity_lookup(ctx: &HandlerContext<'_>, collection: CollectionName) -> Result<Value> {
    let identifier = ctx.param();
    debug!("Looking up {} in {}", identifier, collection);

    ctx.store
        .view(collection)
        .lookup(identifier)?
        .ok_or_else(|| AppError::NotFound(RESOURCE_NOT_FOUND.to_string()))
}

/// GET /{collection}/{filter}...
///
/// `search` 与 `tags` 缺少查询参数时返回完整列表。
pub fn filtered(
    ctx: &HandlerContext<'_>,
    collection: CollectionName,
    route: FilterRoute,
) -> Result<Value> {
    let view = ctx.store.view(collection);

    let filter = match route {
        FilterRoute::Instructor => Filter::Instructor(ctx.param().to_string()),
        FilterRoute::Level => Filter::Level(ctx.param().to_string()),
        FilterRoute::Category => Filter::Category(ctx.param().to_string()),
        FilterRoute::Featured => Filter::Featured,
        FilterRoute::Search => match ctx.path.query_value("title") {
            Some(title) => Filter::TitleContains(title.to_string()),
            None => return view.list(),
        },
        FilterRoute::Tags => match ctx.path.query_value("tags") {
            Some(tags) => Filter::tags_from_csv(tags),
            None => return view.list(),
        },
        FilterRoute::Paginated => return view.page(pagination(ctx)),
    };

    view.filter(&filter)
}

/// 无法解析的分页参数回退到默认值
fn pagination(ctx: &HandlerContext<'_>) -> Pagination {
    let defaults = Pagination::default();
    let read = |key: &str, fallback: usize| {
        ctx.path
            .query_value(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(fallback)
    };
    Pagination::new(read("page", defaults.page), read("size", defaults.size))
}

/// 用户钱包，不存在时为空钱包
///
/// GET /users/{user_id}/tokens
pub fn user_wallet(ctx: &HandlerContext<'_>) -> Result<Value> {
    Ok(serde_json::to_value(ctx.store.wallet_for(ctx.param()))?)
}
