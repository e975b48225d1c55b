//! 会话服务
//!
//! 管理当前登录会话：登录时写入身份快照和令牌两个键，登出时删除，
//! 启动时从键值存储恢复。快照损坏时丢弃并回到未登录状态，从不报错。

use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::models::{Identity, SessionRecord, SessionStatus};
use crate::storage::KeyValueStore;

/// 从原始快照恢复会话
///
/// 两个键都存在、令牌非空且身份快照可解析时才恢复。
pub fn restore_session(identity: Option<&str>, token: Option<&str>) -> Option<SessionRecord> {
    let token = token.filter(|token| !token.is_empty())?;
    let identity: Identity = serde_json::from_str(identity?).ok()?;
    Some(SessionRecord::new(identity, token))
}

/// 会话管理器
pub struct SessionManager {
    storage: Arc<dyn KeyValueStore>,
    identity_key: String,
    token_key: String,
    current: RwLock<Option<SessionRecord>>,
}

impl SessionManager {
    /// 创建管理器，初始为未登录
    pub fn new(storage: Arc<dyn KeyValueStore>, config: &SessionConfig) -> Self {
        Self {
            storage,
            identity_key: config.identity_key.clone(),
            token_key: config.token_key.clone(),
            current: RwLock::new(None),
        }
    }

    /// 启动时恢复会话
    pub fn restore(&self) -> Option<SessionRecord> {
        let identity = self.read_key(&self.identity_key);
        let token = self.read_key(&self.token_key);

        let restored = restore_session(identity.as_deref(), token.as_deref());
        match &restored {
            Some(record) => info!("Restored session for user: {}", record.user_id()),
            None if identity.is_some() || token.is_some() => {
                warn!("Discarding incomplete or corrupt session snapshot");
                self.clear_keys();
            }
            None => debug!("No session snapshot to restore"),
        }

        *self.current.write() = restored.clone();
        restored
    }

    /// 建立会话并持久化
    pub fn establish(&self, identity: Identity, token: &str) -> Result<SessionRecord> {
        let snapshot = serde_json::to_string(&identity)?;
        self.storage.set(&self.identity_key, &snapshot)?;
        self.storage.set(&self.token_key, token)?;

        let record = SessionRecord::new(identity, token);
        info!("Session established for user: {}", record.user_id());
        *self.current.write() = Some(record.clone());
        Ok(record)
    }

    /// 登出：内存状态总是清除，随后删除持久化的键
    pub fn logout(&self) -> Result<()> {
        if let Some(record) = self.current.write().take() {
            info!("Session closed for user: {}", record.user_id());
        }
        self.storage.remove(&self.identity_key)?;
        self.storage.remove(&self.token_key)
    }

    pub fn current(&self) -> Option<SessionRecord> {
        self.current.read().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.current.read().as_ref().map(|record| record.identity.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.current.read().as_ref().map(|record| record.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_authenticated() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::LoggedOut
        }
    }

    /// 按角色名检查，忽略大小写
    pub fn has_role(&self, role: &str) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|record| record.identity.role.matches(role))
    }

    /// 当 `user_id` 为当前用户时，将部分字段合并进身份快照
    ///
    /// 返回更新后的身份；不是当前用户时返回 `None`。
    pub fn update_identity(&self, user_id: &str, patch: &Value) -> Result<Option<Identity>> {
        let mut current = self.current.write();
        let Some(record) = current.as_mut().filter(|record| record.user_id() == user_id) else {
            return Ok(None);
        };

        let mut merged = serde_json::to_value(&record.identity)?;
        if let (Value::Object(target), Value::Object(fields)) = (&mut merged, patch) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }
        let identity: Identity = serde_json::from_value(merged)?;

        self.storage
            .set(&self.identity_key, &serde_json::to_string(&identity)?)?;
        record.identity = identity.clone();
        debug!("Refreshed identity snapshot for user: {}", user_id);
        Ok(Some(identity))
    }

    fn read_key(&self, key: &str) -> Option<String> {
        self.storage.get(key).unwrap_or_else(|e| {
            warn!("Failed to read session key {}: {}", key, e);
            None
        })
    }

    fn clear_keys(&self) {
        for key in [&self.identity_key, &self.token_key] {
            if let Err(e) = self.storage.remove(key) {
                warn!("Failed to remove session key {}: {}", key, e);
            }
        }
    }
}
