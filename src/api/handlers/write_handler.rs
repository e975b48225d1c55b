//! Write Handlers
//!
//! 兜底的读写确认。写操作一律成功，仓库不变。

use chrono::Utc;
use serde_json::{Map, Value};

use crate::api::dto::{MOCK_DATA_RETRIEVED, MessageResponse, RESOURCE_DELETED};
use crate::api::handlers::HandlerContext;
use crate::error::Result;

/// 其他 GET
pub fn acknowledge(_ctx: &HandlerContext<'_>) -> Result<Value> {
    Ok(serde_json::to_value(MessageResponse::new(MOCK_DATA_RETRIEVED))?)
}

/// 其他 POST：回显请求体并附加 `id` 与 `createdAt`
pub fn create(ctx: &HandlerContext<'_>) -> Result<Value> {
    let now = Utc::now();
    let mut fields = body_fields(ctx);
    fields.insert(
        "id".into(),
        Value::String(format!("mock-id-{}", now.timestamp_millis())),
    );
    fields.insert("createdAt".into(), Value::String(now.to_rfc3339()));
    Ok(Value::Object(fields))
}

/// 其他 PUT：回显请求体，`id` 取路径末尾片段并附加 `updatedAt`
pub fn update(ctx: &HandlerContext<'_>) -> Result<Value> {
    let id = ctx.path.last_segment().unwrap_or("unknown");
    let mut fields = body_fields(ctx);
    fields.insert("id".into(), Value::String(id.to_string()));
    fields.insert("updatedAt".into(), Value::String(Utc::now().to_rfc3339()));
    Ok(Value::Object(fields))
}

/// 其他 DELETE
pub fn remove(_ctx: &HandlerContext<'_>) -> Result<Value> {
    Ok(serde_json::to_value(MessageResponse::new(RESOURCE_DELETED))?)
}

/// 非对象请求体视为空对象
fn body_fields(ctx: &HandlerContext<'_>) -> Map<String, Value> {
    match &ctx.request.body {
        Some(Value::Object(fields)) => fields.clone(),
        _ => Map::new(),
    }
}
