//! 响应信封与延迟模拟

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::error::Result;

/// 成功响应 `{ payload, status, statusText }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "data")]
    pub payload: Value,
    pub status: u16,
    #[serde(rename = "statusText")]
    pub status_text: String,
}

impl Envelope {
    /// 200 OK
    pub fn ok(payload: Value) -> Self {
        Self::with_status(payload, 200)
    }

    pub fn with_status(payload: Value, status: u16) -> Self {
        let status_text = if status == 200 { "OK" } else { "Error" };
        Self {
            payload,
            status,
            status_text: status_text.to_string(),
        }
    }

    /// 将负载反序列化为具体类型
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.payload.clone())?)
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// 固定的模拟网络延迟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    delay: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self::fixed(Duration::from_millis(300))
    }
}

impl Latency {
    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    /// 不延迟
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::fixed(config.latency())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 等待一次往返延迟；无法取消计时，只能忽略结果
    pub async fn elapse(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
