//! 服务模块
//!
//! 标识解析、身份解析、会话管理、认证流程与类型化客户端服务。

pub mod auth;
pub mod client;
pub mod course;
pub mod identity;
pub mod resolver;
pub mod session;
pub mod user;

pub use auth::AuthService;
pub use client::ApiClient;
pub use course::CourseService;
pub use identity::{IdentityResolver, StoreIdentityResolver, TOKEN_PREFIX};
pub use resolver::{MatchStep, resolve, resolve_with_step, slugify, strict_slug};
pub use session::{SessionManager, restore_session};
pub use user::UserService;
