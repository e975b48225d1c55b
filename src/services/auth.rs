//! 认证流程
//!
//! 登录经由分发器校验凭据并建立会话；注册只生成新身份，不登录也不写入仓库。

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dispatcher::Dispatcher;
use crate::api::dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::api::request::Request;
use crate::error::Result;
use crate::models::{Identity, Role};
use crate::services::session::SessionManager;

/// 认证服务
pub struct AuthService {
    dispatcher: Arc<dyn Dispatcher>,
    sessions: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, sessions: Arc<SessionManager>) -> Self {
        Self {
            dispatcher,
            sessions,
        }
    }

    /// 用户名或邮箱登录，成功后建立会话
    ///
    /// 凭据错误时返回 `Unauthorized`，现有会话保持不变。
    pub async fn login(&self, login: &str, password: &str) -> Result<Identity> {
        let body = serde_json::to_value(LoginRequest::new(login, password))?;
        let envelope = self
            .dispatcher
            .dispatch(&Request::post("/auth/login", body))
            .await?;

        let LoginResponse { token, user } = envelope.payload_as()?;
        self.sessions.establish(user.clone(), &token)?;
        Ok(user)
    }

    /// 注册，返回新的学生身份
    pub async fn register(&self, form: RegisterRequest) -> Result<Identity> {
        let body = serde_json::to_value(&form)?;
        self.dispatcher
            .dispatch(&Request::post("/auth/register", body))
            .await?;

        let identity = registered_identity(&form);
        info!("Registered new user: {}", identity.id);
        Ok(identity)
    }

    pub fn logout(&self) -> Result<()> {
        self.sessions.logout()
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }
}

/// 由注册表单生成身份
fn registered_identity(form: &RegisterRequest) -> Identity {
    let name = format!("{} {}", form.first_name, form.last_name);
    let avatar = format!(
        "https://ui-avatars.com/api/?name={}+{}&background=4CAF50&color=fff",
        urlencoding::encode(&form.first_name),
        urlencoding::encode(&form.last_name)
    );

    Identity {
        id: format!("user-{}", Utc::now().timestamp_millis()),
        username: form.username.clone(),
        email: form.email.clone(),
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        name,
        role: Role::Student,
        avatar,
        enrolled_courses: Vec::new(),
        completed_courses: Vec::new(),
        solved_problems: Vec::new(),
    }
}
