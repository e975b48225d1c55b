//! 可观测性模块
//!
//! 提供结构化日志初始化和进程内分发指标。没有导出端点。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{AppError, Result};

// ===== Dispatch Metrics =====

/// 分发指标
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    requests_total: AtomicU64,
    unauthorized_total: AtomicU64,
    not_found_total: AtomicU64,
    latency_ms_sum: AtomicU64,
}

/// 指标快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub rejections_total: u64,
    pub unauthorized_total: u64,
    pub not_found_total: u64,
    pub latency_ms_sum: u64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一次分发，`status` 为最终状态码
    pub fn record(&self, status: u16, latency: Duration) {
        self.requests_total.fetch_add(1, Ordering::SeqCst);
        self.latency_ms_sum
            .fetch_add(latency.as_millis() as u64, Ordering::SeqCst);

        match status {
            401 => {
                self.unauthorized_total.fetch_add(1, Ordering::SeqCst);
            }
            404 => {
                self.not_found_total.fetch_add(1, Ordering::SeqCst);
            }
            _ => {}
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let unauthorized_total = self.unauthorized_total.load(Ordering::SeqCst);
        let not_found_total = self.not_found_total.load(Ordering::SeqCst);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::SeqCst),
            rejections_total: unauthorized_total + not_found_total,
            unauthorized_total,
            not_found_total,
            latency_ms_sum: self.latency_ms_sum.load(Ordering::SeqCst),
        }
    }
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时写入按天滚动的文件，
/// 否则写入 stderr；返回的 guard 必须在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AppError::Config(format!("invalid log level: {}", e)))?;

    let (writer, guard) = match &config.log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            dir,
            "lms-mock.log",
        )),
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| AppError::Internal(format!("failed to set tracing subscriber: {}", e)))?;

    Ok(guard)
}
