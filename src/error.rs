//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。
//! 分发器只会产生 `Unauthorized` 与 `NotFound` 两种拒绝，其余变体用于配置、存储等外围逻辑。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 未认证（缺少令牌、令牌无效或凭据错误）
    #[error("{0}")]
    Unauthorized(String),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    Serialization(String),

    /// 键值存储错误
    #[error("存储错误: {0}")]
    Storage(String),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP 状态码
    pub fn status(&self) -> u16 {
        let (status, _) = self.into();
        status
    }

    /// 是否为未认证错误
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }

    /// 转换为拒绝响应体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(&self.to_string(), self.status())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serialization(e.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 拒绝响应体 `{ message, status }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误消息
    pub message: String,
    /// HTTP 状态码
    pub status: u16,
    /// 状态文本，拒绝时固定为 "Error"
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(message: &str, status: u16) -> Self {
        Self {
            message: message.to_string(),
            status,
            status_text: "Error".to_string(),
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::Unauthorized(_) => (401, "UNAUTHORIZED".to_string()),
            AppError::NotFound(_) => (404, "NOT_FOUND".to_string()),
            AppError::Config(_) => (500, "CONFIG_ERROR".to_string()),
            AppError::Storage(_) => (500, "STORAGE_ERROR".to_string()),
            _ => (500, "INTERNAL_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::Unauthorized("Unauthorized".into()).status(), 401);
        assert_eq!(AppError::NotFound("Resource not found".into()).status(), 404);
        assert_eq!(AppError::Internal("boom".into()).status(), 500);
    }

    #[test]
    fn test_rejection_body_carries_message_and_status() {
        let body = AppError::Unauthorized("Invalid credentials".into()).to_response();
        assert_eq!(body.message, "Invalid credentials");
        assert_eq!(body.status, 401);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusText"], "Error");
    }
}
