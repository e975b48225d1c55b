use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// 模拟 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// 模拟网络延迟（毫秒）
    pub latency_ms: u64,
    /// 请求路径前缀，匹配前会被剥离，例如 `/api/v1`
    pub base_path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            base_path: None,
        }
    }
}

impl ApiConfig {
    /// 延迟时长
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// 会话快照配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 快照文件路径，为空时仅保存在内存中
    pub storage_path: Option<PathBuf>,
    /// 身份快照的键名
    pub identity_key: String,
    /// 令牌的键名
    pub token_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: None,
            identity_key: "user".into(),
            token_key: "token".into(),
        }
    }
}

/// 资源仓库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// 替换内置种子数据的 JSON 目录文件
    pub catalog_path: Option<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 模拟 API 配置
    pub api: ApiConfig,
    /// 会话配置
    pub session: SessionConfig,
    /// 资源仓库配置
    pub store: StoreConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "lms-mock".into(),
            environment: "development".into(),
        }
    }

    /// 创建测试配置（无延迟）
    pub fn testing() -> Self {
        let mut config = Self::development();
        config.environment = "testing".into();
        config.api.latency_ms = 0;
        config.logging.level = "warn".into();
        config
    }
}
