//! 用户与身份模型
//!
//! [`UserAccount`] 持有凭据，序列化时永远不会输出密码；
//! 对外返回的始终是 [`Identity`]。

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::models::record::{Entity, RecordId};

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[display("ADMIN")]
    Admin,
    #[display("STUDENT")]
    Student,
    #[display("INSTRUCTOR")]
    Instructor,
}

impl Role {
    /// 按名称匹配角色，忽略大小写
    pub fn matches(&self, name: &str) -> bool {
        self.to_string().eq_ignore_ascii_case(name)
    }
}

/// 公开身份记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    #[serde(default)]
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// 显示名称
    #[serde(default)]
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub enrolled_courses: Vec<String>,
    #[serde(default)]
    pub completed_courses: Vec<String>,
    #[serde(default)]
    pub solved_problems: Vec<String>,
}

impl Identity {
    /// 显示名称，缺省时由姓和名拼接
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// 登录名可以是用户名或邮箱
    pub fn answers_to(&self, login: &str) -> bool {
        (!self.username.is_empty() && self.username == login) || self.email == login
    }
}

/// 带凭据的用户账号
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl UserAccount {
    /// 校验登录名与密码
    pub fn verify(&self, login: &str, password: &str) -> bool {
        self.identity.answers_to(login) && !self.password.is_empty() && self.password == password
    }
}

impl Entity for UserAccount {
    fn id(&self) -> RecordId {
        RecordId::Key(self.identity.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        serde_json::from_value(serde_json::json!({
            "id": "admin-123",
            "username": "admin",
            "email": "admin@gmail.com",
            "firstName": "Admin",
            "lastName": "User",
            "role": "ADMIN",
            "password": "admin123"
        }))
        .unwrap()
    }

    #[test]
    fn test_password_never_serialized() {
        let json = serde_json::to_value(account()).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "admin@gmail.com");
    }

    #[test]
    fn test_verify_accepts_username_or_email() {
        let account = account();
        assert!(account.verify("admin@gmail.com", "admin123"));
        assert!(account.verify("admin", "admin123"));
        assert!(!account.verify("admin", "wrong"));
        assert!(!account.verify("student@gmail.com", "admin123"));
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        assert_eq!(account().identity.display_name(), "Admin User");
        assert!(Role::Admin.matches("admin"));
    }
}
