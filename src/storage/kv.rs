//! 键值存储
//!
//! 会话快照的持久化介质：身份快照和令牌各占一个键。
//! 文件实现在每次写入后整体重写 JSON 文件。

use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

use crate::config::SessionConfig;
use crate::error::{AppError, Result};

/// 键值存储 trait
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// 读取键
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// 写入键
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 删除键，键不存在时不报错
    fn remove(&self, key: &str) -> Result<()>;
}

/// 内存键值存储，进程退出即丢失
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: DashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 文件键值存储
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    /// 打开存储文件；文件不存在时从空开始，内容损坏时丢弃
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Discarding unreadable key-value file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)
            .map_err(|e| AppError::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// 根据会话配置创建键值存储
pub fn create_key_value_store(config: &SessionConfig) -> Result<Arc<dyn KeyValueStore>> {
    match &config.storage_path {
        Some(path) => Ok(Arc::new(FileKeyValueStore::open(path)?)),
        None => Ok(Arc::new(MemoryKeyValueStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("lms-mock-kv-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        store.set("token", "mock-token-admin-123").unwrap();
        assert_eq!(store.get("token").unwrap().as_deref(), Some("mock-token-admin-123"));
        store.remove("token").unwrap();
        assert_eq!(store.get("token").unwrap(), None);
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path();
        {
            let store = FileKeyValueStore::open(&path).unwrap();
            store.set("user", r#"{"id":"admin-123"}"#).unwrap();
            store.set("token", "mock-token-admin-123").unwrap();
            store.remove("token").unwrap();
        }

        let reopened = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(reopened.get("user").unwrap().as_deref(), Some(r#"{"id":"admin-123"}"#));
        assert_eq!(reopened.get("token").unwrap(), None);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let path = temp_path();
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileKeyValueStore::open(&path).unwrap();
        assert_eq!(store.get("user").unwrap(), None);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_factory_defaults_to_memory() {
        let store = create_key_value_store(&SessionConfig::default()).unwrap();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
