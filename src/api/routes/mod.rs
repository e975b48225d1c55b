//! Routes 模块
//!
//! 有序的路由表：路径模板 → 路由种类。按注册顺序匹配，先命中者胜出，
//! 因此更具体的嵌套路由必须先于 `/{collection}/{id}` 注册。

pub mod auth_routes;
pub mod collection_routes;
pub mod fallback_routes;

use crate::api::request::{RequestPath, Verb};
use crate::storage::CollectionName;

/// 集合过滤路由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRoute {
    Instructor,
    Level,
    Category,
    /// `?tags=a,b`
    Tags,
    /// `?title=..`
    Search,
    Featured,
    /// `?page=&size=`
    Paginated,
}

/// 路由种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// 凭据登录
    Login,
    /// 注册确认
    Register,
    /// 当前令牌对应的身份
    CurrentUser,
    /// 用户代币钱包
    UserWallet,
    /// 过滤列表
    Filtered(CollectionName, FilterRoute),
    /// 单条记录
    EntityLookup(CollectionName),
    /// 完整列表
    FullList(CollectionName),
    /// 其他 GET
    Acknowledge,
    /// 其他 POST：回显并附加 id 与创建时间
    Create,
    /// 其他 PUT：回显并附加末尾片段 id 与更新时间
    Update,
    /// 其他 DELETE
    Remove,
}

/// 模板片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// 字面量
    Literal(String),
    /// `{name}` 参数
    Param(String),
    /// `*`，匹配剩余任意片段（包括空）
    Rest,
}

/// 路由模板
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePattern {
    verb: Verb,
    template: String,
    segments: Vec<Segment>,
    kind: RouteKind,
}

impl RoutePattern {
    /// 解析模板，例如 `/courses/level/{value}`、`/*`
    pub fn new(verb: Verb, template: &str, kind: RouteKind) -> Self {
        let segments = template
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                if s == "*" {
                    Segment::Rest
                } else if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                    Segment::Param(name.to_string())
                } else {
                    Segment::Literal(s.to_string())
                }
            })
            .collect();

        Self {
            verb,
            template: template.to_string(),
            segments,
            kind,
        }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    /// 匹配片段，成功时返回按顺序提取的参数
    pub fn capture(&self, segments: &[String]) -> Option<Vec<String>> {
        let mut params = Vec::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Rest => return Some(params),
                Segment::Literal(literal) => {
                    if segments.get(index)? != literal {
                        return None;
                    }
                }
                Segment::Param(_) => params.push(segments.get(index)?.clone()),
            }
        }

        (segments.len() == self.segments.len()).then_some(params)
    }
}

/// 命中结果
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch<'a> {
    pub pattern: &'a RoutePattern,
    pub params: Vec<String>,
}

impl RouteMatch<'_> {
    pub fn kind(&self) -> RouteKind {
        self.pattern.kind
    }

    /// 第一个参数
    pub fn param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

/// 有序路由表
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    patterns: Vec<RoutePattern>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条路由（优先级低于已有路由）
    pub fn route(mut self, verb: Verb, template: &str, kind: RouteKind) -> Self {
        self.patterns.push(RoutePattern::new(verb, template, kind));
        self
    }

    /// 追加另一张表的全部路由
    pub fn merge(mut self, other: RouteTable) -> Self {
        self.patterns.extend(other.patterns);
        self
    }

    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }

    /// 按优先级查找第一条匹配的路由
    pub fn find(&self, verb: Verb, path: &RequestPath) -> Option<RouteMatch<'_>> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.verb == verb)
            .find_map(|pattern| {
                pattern
                    .capture(&path.segments)
                    .map(|params| RouteMatch { pattern, params })
            })
    }
}

/// 完整路由表
pub fn create_route_table() -> RouteTable {
    RouteTable::new()
        .merge(auth_routes::create_auth_routes())
        .merge(collection_routes::create_collection_routes())
        .merge(fallback_routes::create_fallback_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(verb: Verb, path: &str) -> (RouteKind, Vec<String>) {
        let table = create_route_table();
        let parsed = RequestPath::parse(path, None);
        let matched = table.find(verb, &parsed).expect("fallback routes match everything");
        (matched.kind(), matched.params)
    }

    #[test]
    fn test_template_parsing() {
        let pattern = RoutePattern::new(Verb::Get, "/users/{id}/tokens", RouteKind::UserWallet);
        let segments = vec!["users".to_string(), "admin-123".to_string(), "tokens".to_string()];
        assert_eq!(pattern.capture(&segments), Some(vec!["admin-123".to_string()]));
        assert_eq!(pattern.capture(&segments[..2]), None);
    }

    #[test]
    fn test_specific_routes_win_over_entity_lookup() {
        use CollectionName::Courses;
        assert_eq!(
            find(Verb::Get, "/courses/featured").0,
            RouteKind::Filtered(Courses, FilterRoute::Featured)
        );
        assert_eq!(
            find(Verb::Get, "/courses/level/beginner"),
            (
                RouteKind::Filtered(Courses, FilterRoute::Level),
                vec!["beginner".to_string()]
            )
        );
        assert_eq!(
            find(Verb::Get, "/courses/search?title=java").0,
            RouteKind::Filtered(Courses, FilterRoute::Search)
        );
        assert_eq!(find(Verb::Get, "/courses/5").0, RouteKind::EntityLookup(Courses));
        assert_eq!(find(Verb::Get, "/courses").0, RouteKind::FullList(Courses));
    }

    #[test]
    fn test_identity_routes_precede_user_lookup() {
        assert_eq!(find(Verb::Get, "/users/me").0, RouteKind::CurrentUser);
        assert_eq!(
            find(Verb::Get, "/users/student-456/tokens").0,
            RouteKind::UserWallet
        );
        assert_eq!(
            find(Verb::Get, "/users/student-456").0,
            RouteKind::EntityLookup(CollectionName::Users)
        );
    }

    #[test]
    fn test_nested_collection_paths() {
        assert_eq!(
            find(Verb::Get, "/virtual-campus/buildings/bldg-2").0,
            RouteKind::EntityLookup(CollectionName::Buildings)
        );
        assert_eq!(
            find(Verb::Get, "/metaverse/events").0,
            RouteKind::FullList(CollectionName::MetaverseEvents)
        );
    }

    #[test]
    fn test_fallbacks_per_verb() {
        assert_eq!(find(Verb::Get, "/unknown/thing").0, RouteKind::Acknowledge);
        assert_eq!(find(Verb::Post, "/courses").0, RouteKind::Create);
        assert_eq!(find(Verb::Post, "/auth/login").0, RouteKind::Login);
        assert_eq!(find(Verb::Post, "/auth/register").0, RouteKind::Register);
        assert_eq!(find(Verb::Put, "/courses/5").0, RouteKind::Update);
        assert_eq!(find(Verb::Delete, "/courses/5").0, RouteKind::Remove);
        assert_eq!(find(Verb::Get, "/").0, RouteKind::Acknowledge);
    }
}
