use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 模拟延迟上限（毫秒），延迟必须有界
pub const MAX_LATENCY_MS: u64 = 10_000;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 搜索路径：
    /// 1. 内置开发配置
    /// 2. ./lms-mock.toml
    /// 3. 环境变量 `LMS_MOCK_*`（嵌套字段使用 `__` 分隔）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("LMS_MOCK_").split("__"))
            .extract()
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.api.latency_ms > MAX_LATENCY_MS {
            return Err(ConfigValidationError::LatencyTooHigh(config.api.latency_ms));
        }

        if config.session.identity_key.is_empty() || config.session.token_key.is_empty() {
            return Err(ConfigValidationError::MissingSessionKey);
        }

        if let Some(base) = &config.api.base_path {
            if !base.starts_with('/') {
                return Err(ConfigValidationError::InvalidBasePath(base.clone()));
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("模拟延迟过大: {0}ms（上限 {MAX_LATENCY_MS}ms）")]
    LatencyTooHigh(u64),

    #[error("会话键名未配置")]
    MissingSessionKey,

    #[error("路径前缀必须以 / 开头: {0}")]
    InvalidBasePath(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("lms-mock.toml")
}
