//! Collection Routes
//!
//! 每个集合注册过滤、单条与列表三类 GET 路由，过滤路由在前。

use crate::api::request::Verb;
use crate::api::routes::{FilterRoute, RouteKind, RouteTable};
use crate::storage::CollectionName;

/// 过滤路由的路径后缀，按注册顺序排列
const FILTER_SUFFIXES: [(&str, FilterRoute); 7] = [
    ("instructor/{value}", FilterRoute::Instructor),
    ("level/{value}", FilterRoute::Level),
    ("category/{value}", FilterRoute::Category),
    ("tags", FilterRoute::Tags),
    ("search", FilterRoute::Search),
    ("featured", FilterRoute::Featured),
    ("paginated", FilterRoute::Paginated),
];

/// 单个集合的路由
pub fn create_routes_for(collection: CollectionName) -> RouteTable {
    let base = collection.path();

    FILTER_SUFFIXES
        .into_iter()
        .fold(RouteTable::new(), |table, (suffix, route)| {
            table.route(
                Verb::Get,
                &format!("{base}/{suffix}"),
                RouteKind::Filtered(collection, route),
            )
        })
        .route(Verb::Get, &format!("{base}/{{id}}"), RouteKind::EntityLookup(collection))
        .route(Verb::Get, base, RouteKind::FullList(collection))
}

/// 全部集合的路由
pub fn create_collection_routes() -> RouteTable {
    CollectionName::ALL
        .into_iter()
        .map(create_routes_for)
        .fold(RouteTable::new(), RouteTable::merge)
}
