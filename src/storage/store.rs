//! 资源仓库
//!
//! 启动时构建一次，之后只读。POST/PUT/DELETE 不会修改仓库。

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::models::{Course, Document, Entity, Identity, Problem, TokenWallet, UserAccount};
use crate::services::resolver;
use crate::storage::query::{Filter, Page, Pagination};
use crate::storage::seed::Catalog;

/// 集合名称及其路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Courses,
    Problems,
    Users,
    Buildings,
    Avatars,
    VrSessions,
    Classrooms,
    DigitalTwins,
    AiCompanions,
    Credentials,
    MetaverseEvents,
    CodeVisualizations,
    CollabSessions,
    Tokens,
}

impl CollectionName {
    /// 全部集合，顺序即路由注册顺序
    pub const ALL: [CollectionName; 14] = [
        CollectionName::Courses,
        CollectionName::Problems,
        CollectionName::Users,
        CollectionName::Buildings,
        CollectionName::Avatars,
        CollectionName::VrSessions,
        CollectionName::Classrooms,
        CollectionName::DigitalTwins,
        CollectionName::AiCompanions,
        CollectionName::Credentials,
        CollectionName::MetaverseEvents,
        CollectionName::CodeVisualizations,
        CollectionName::CollabSessions,
        CollectionName::Tokens,
    ];

    /// 集合路径
    pub fn path(&self) -> &'static str {
        match self {
            CollectionName::Courses => "/courses",
            CollectionName::Problems => "/problems",
            CollectionName::Users => "/users",
            CollectionName::Buildings => "/virtual-campus/buildings",
            CollectionName::Avatars => "/virtual-campus/avatars",
            CollectionName::VrSessions => "/vr-sessions",
            CollectionName::Classrooms => "/classrooms",
            CollectionName::DigitalTwins => "/digital-twins",
            CollectionName::AiCompanions => "/ai-companions",
            CollectionName::Credentials => "/credentials",
            CollectionName::MetaverseEvents => "/metaverse/events",
            CollectionName::CodeVisualizations => "/code-visualizations",
            CollectionName::CollabSessions => "/collab-sessions",
            CollectionName::Tokens => "/tokens",
        }
    }

    /// 路径片段
    pub fn segments(&self) -> Vec<&'static str> {
        self.path().split('/').filter(|s| !s.is_empty()).collect()
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// 同类记录的有序集合
#[derive(Debug, Clone)]
pub struct Collection<T> {
    name: CollectionName,
    records: Vec<T>,
}

impl<T: Entity> Collection<T> {
    pub fn new(name: CollectionName, records: Vec<T>) -> Self {
        Self { name, records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 按 ID 的字符串形式直接查找
    pub fn find_by_key(&self, key: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id().matches_key(key))
    }

    /// 先直接查找，未命中再交给标识解析器
    pub fn lookup(&self, identifier: &str) -> Option<&T> {
        self.find_by_key(identifier)
            .or_else(|| resolver::resolve(identifier, &self.records))
    }
}

/// 分发器使用的对象安全视图，输出均为 JSON
pub trait CollectionView: Send + Sync {
    fn name(&self) -> CollectionName;

    /// 完整列表，保持原始顺序
    fn list(&self) -> Result<Value>;

    /// 单条记录，未命中为 `None`
    fn lookup(&self, identifier: &str) -> Result<Option<Value>>;

    /// 过滤后的列表
    fn filter(&self, filter: &Filter) -> Result<Value>;

    /// 分页列表
    fn page(&self, pagination: Pagination) -> Result<Value>;
}

impl<T: Entity + Serialize + Clone> CollectionView for Collection<T> {
    fn name(&self) -> CollectionName {
        self.name
    }

    fn list(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.records)?)
    }

    fn lookup(&self, identifier: &str) -> Result<Option<Value>> {
        Collection::lookup(self, identifier)
            .map(serde_json::to_value)
            .transpose()
            .map_err(Into::into)
    }

    fn filter(&self, filter: &Filter) -> Result<Value> {
        let matched: Vec<&T> = self
            .records
            .iter()
            .filter(|record| filter.accepts(*record))
            .collect();
        Ok(serde_json::to_value(matched)?)
    }

    fn page(&self, pagination: Pagination) -> Result<Value> {
        Ok(serde_json::to_value(Page::slice(&self.records, pagination))?)
    }
}

/// 内存资源仓库
#[derive(Debug, Clone)]
pub struct ResourceStore {
    courses: Collection<Course>,
    problems: Collection<Problem>,
    users: Collection<UserAccount>,
    buildings: Collection<Document>,
    avatars: Collection<Document>,
    vr_sessions: Collection<Document>,
    classrooms: Collection<Document>,
    digital_twins: Collection<Document>,
    ai_companions: Collection<Document>,
    credentials: Collection<Document>,
    metaverse_events: Collection<Document>,
    code_visualizations: Collection<Document>,
    collab_sessions: Collection<Document>,
    tokens: Collection<TokenWallet>,
}

impl ResourceStore {
    /// 从目录构建
    pub fn from_catalog(catalog: Catalog) -> Self {
        use CollectionName::*;
        Self {
            courses: Collection::new(Courses, catalog.courses),
            problems: Collection::new(Problems, catalog.problems),
            users: Collection::new(Users, catalog.users),
            buildings: Collection::new(Buildings, catalog.buildings),
            avatars: Collection::new(Avatars, catalog.avatars),
            vr_sessions: Collection::new(VrSessions, catalog.vr_sessions),
            classrooms: Collection::new(Classrooms, catalog.classrooms),
            digital_twins: Collection::new(DigitalTwins, catalog.digital_twins),
            ai_companions: Collection::new(AiCompanions, catalog.ai_companions),
            credentials: Collection::new(Credentials, catalog.credentials),
            metaverse_events: Collection::new(MetaverseEvents, catalog.metaverse_events),
            code_visualizations: Collection::new(CodeVisualizations, catalog.code_visualizations),
            collab_sessions: Collection::new(CollabSessions, catalog.collab_sessions),
            tokens: Collection::new(Tokens, catalog.tokens),
        }
    }

    /// 使用内置种子数据
    pub fn seeded() -> Result<Self> {
        Ok(Self::from_catalog(Catalog::embedded()?))
    }

    /// 从外部 JSON 目录文件构建
    pub fn from_json_file(path: &Path) -> Result<Self> {
        Ok(Self::from_catalog(Catalog::from_path(path)?))
    }

    /// 根据配置构建
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        match &config.catalog_path {
            Some(path) => Self::from_json_file(path),
            None => Self::seeded(),
        }
    }

    /// 获取集合视图
    pub fn view(&self, name: CollectionName) -> &dyn CollectionView {
        match name {
            CollectionName::Courses => &self.courses,
            CollectionName::Problems => &self.problems,
            CollectionName::Users => &self.users,
            CollectionName::Buildings => &self.buildings,
            CollectionName::Avatars => &self.avatars,
            CollectionName::VrSessions => &self.vr_sessions,
            CollectionName::Classrooms => &self.classrooms,
            CollectionName::DigitalTwins => &self.digital_twins,
            CollectionName::AiCompanions => &self.ai_companions,
            CollectionName::Credentials => &self.credentials,
            CollectionName::MetaverseEvents => &self.metaverse_events,
            CollectionName::CodeVisualizations => &self.code_visualizations,
            CollectionName::CollabSessions => &self.collab_sessions,
            CollectionName::Tokens => &self.tokens,
        }
    }

    pub fn courses(&self) -> &Collection<Course> {
        &self.courses
    }

    pub fn problems(&self) -> &Collection<Problem> {
        &self.problems
    }

    /// 凭据校验，成功时返回公开身份
    pub fn authenticate(&self, login: &str, password: &str) -> Option<&Identity> {
        self.users
            .records()
            .iter()
            .find(|account| account.verify(login, password))
            .map(|account| &account.identity)
    }

    /// 按用户 ID 查找身份
    pub fn identity(&self, user_id: &str) -> Option<&Identity> {
        self.users
            .find_by_key(user_id)
            .map(|account| &account.identity)
    }

    /// 用户钱包，不存在时返回空钱包
    pub fn wallet_for(&self, user_id: &str) -> TokenWallet {
        self.tokens
            .records()
            .iter()
            .find(|wallet| wallet.user_id == user_id)
            .cloned()
            .unwrap_or_else(|| TokenWallet::empty(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resolver::slugify;

    fn store() -> ResourceStore {
        ResourceStore::seeded().unwrap()
    }

    #[test]
    fn test_every_course_resolves_by_id_and_slug() {
        let store = store();
        let courses = store.courses();
        for course in courses.records() {
            assert_eq!(courses.lookup(&course.id.to_string()), Some(course));
            assert_eq!(courses.lookup(&slugify(&course.title)), Some(course));
        }
    }

    #[test]
    fn test_oops_course_resolves_three_ways() {
        let store = store();
        let courses = store.courses();
        let by_id = courses.lookup("2").unwrap();
        assert_eq!(by_id.title, "OOPs in C++");
        assert_eq!(courses.lookup("oops-in-c++"), Some(by_id));
        assert_eq!(courses.lookup("oopsinc++"), Some(by_id));
    }

    #[test]
    fn test_string_keyed_records_use_direct_lookup() {
        let store = store();
        assert_eq!(store.problems().lookup("problem-2").unwrap().title, "Valid Parentheses");
        assert_eq!(store.problems().lookup("two-sum").unwrap().id, "problem-1");
        assert!(store.problems().lookup("nonexistent-xyz-123").is_none());
    }

    #[test]
    fn test_user_view_never_exposes_passwords() {
        let users = store().view(CollectionName::Users).list().unwrap();
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|user| user.get("password").is_none()));
    }

    #[test]
    fn test_authenticate_and_identity_lookup() {
        let store = store();
        let admin = store.authenticate("admin@gmail.com", "admin123").unwrap();
        assert_eq!(admin.id, "admin-123");
        assert!(store.authenticate("admin@gmail.com", "password").is_none());
        assert_eq!(store.identity("student-456").unwrap().email, "student@gmail.com");
    }

    #[test]
    fn test_wallet_defaults_to_empty() {
        let store = store();
        assert_eq!(store.wallet_for("admin-123").balance, 500);
        assert_eq!(store.wallet_for("ghost"), TokenWallet::empty("ghost"));
    }

    #[test]
    fn test_collection_paths_are_unique() {
        let mut paths: Vec<_> = CollectionName::ALL.iter().map(|c| c.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), CollectionName::ALL.len());
    }
}
