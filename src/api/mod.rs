//! API 模块
//!
//! 进程内模拟后端：请求描述、路由表、处理程序与分发器。不打开任何套接字。

pub mod app_state;
pub mod dispatcher;
pub mod dto;
pub mod envelope;
pub mod handlers;
pub mod request;
pub mod routes;

pub use app_state::AppState;
pub use dispatcher::{Dispatcher, MockApi};
pub use envelope::{Envelope, Latency};
pub use request::{Request, RequestPath, Verb};
