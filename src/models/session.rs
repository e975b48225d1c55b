use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::{Identity, Role};

/// 会话状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum SessionStatus {
    /// 未登录
    #[default]
    LoggedOut,
    /// 已登录
    Authenticated,
}

/// 会话记录
///
/// 登录时创建并写入键值存储，登出时删除，启动时从快照恢复。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    /// 身份快照
    pub identity: Identity,

    /// 不透明的 Bearer 令牌
    pub token: String,

    /// 建立时间（进程内），恢复的会话为恢复时间
    pub established_at: DateTime<Utc>,
}

impl SessionRecord {
    /// 创建新会话记录
    pub fn new(identity: Identity, token: impl Into<String>) -> Self {
        Self {
            identity,
            token: token.into(),
            established_at: Utc::now(),
        }
    }

    /// 检查角色
    pub fn has_role(&self, role: Role) -> bool {
        self.identity.role == role
    }

    /// 用户 ID
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}
