//! DTO 模块
//!
//! 分发器请求体与响应负载的数据结构。

pub mod auth_dto;
pub mod message_dto;

pub use auth_dto::*;
pub use message_dto::*;
