//! LMS Mock - 学习平台的进程内模拟后端
//!
//! 将请求路径分发到内存中的资源集合，返回 `{ payload, status, statusText }` 信封
//! 或 `{ message, status }` 拒绝。包括数字 ID / slug 标识解析、令牌到身份的解析、
//! 会话快照持久化和固定的模拟网络延迟。

pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
