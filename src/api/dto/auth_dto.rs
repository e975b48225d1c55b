//! 认证 DTO
//!
//! 登录与注册相关的请求和响应数据结构。

use serde::{Deserialize, Serialize};

use crate::models::Identity;

/// 登录请求，`username` 与 `email` 任取其一，`username` 优先
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// 用户名或邮箱
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// 密码
    pub password: String,
}

impl LoginRequest {
    pub fn new(login: &str, password: &str) -> Self {
        Self {
            username: Some(login.to_string()),
            email: None,
            password: password.to_string(),
        }
    }

    /// 用于匹配的登录名
    pub fn login(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .filter(|login| !login.is_empty())
    }
}

/// 登录响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer 令牌
    pub token: String,
    /// 公开身份，不含密码
    pub user: Identity,
}

/// 注册表单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}
