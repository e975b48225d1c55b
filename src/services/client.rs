//! API 客户端
//!
//! 包装分发器：每个请求自动附带当前会话令牌，收到 401 拒绝时清除会话。

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::api::dispatcher::Dispatcher;
use crate::api::envelope::Envelope;
use crate::api::request::Request;
use crate::error::Result;
use crate::services::session::SessionManager;

/// 带会话拦截的客户端
#[derive(Clone)]
pub struct ApiClient {
    dispatcher: Arc<dyn Dispatcher>,
    sessions: Arc<SessionManager>,
}

impl ApiClient {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, sessions: Arc<SessionManager>) -> Self {
        Self {
            dispatcher,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// 发送请求；调用方显式提供的令牌优先
    pub async fn send(&self, mut request: Request) -> Result<Envelope> {
        if request.token.is_none() {
            request.token = self.sessions.token();
        }

        let outcome = self.dispatcher.dispatch(&request).await;
        if let Err(err) = &outcome {
            if err.is_unauthorized() && self.sessions.is_authenticated() {
                warn!("Unauthorized response, clearing session");
                if let Err(e) = self.sessions.logout() {
                    warn!("Failed to clear session: {}", e);
                }
            }
        }
        outcome
    }

    pub async fn get(&self, path: &str) -> Result<Envelope> {
        self.send(Request::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Envelope> {
        self.send(Request::post(path, body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<Envelope> {
        self.send(Request::put(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Envelope> {
        self.send(Request::delete(path)).await
    }

    /// GET 并反序列化负载
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get(path).await?.payload_as()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dispatcher::MockDispatcher;
    use crate::config::SessionConfig;
    use crate::error::AppError;
    use crate::models::Identity;
    use crate::storage::MemoryKeyValueStore;

    fn sessions() -> Arc<SessionManager> {
        Arc::new(SessionManager::new(
            Arc::new(MemoryKeyValueStore::new()),
            &SessionConfig::default(),
        ))
    }

    fn identity() -> Identity {
        serde_json::from_value(serde_json::json!({
            "id": "admin-123",
            "email": "admin@gmail.com",
            "role": "ADMIN"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_token_is_attached() {
        let mut dispatcher = MockDispatcher::new();
        dispatcher
            .expect_dispatch()
            .withf(|request| request.token.as_deref() == Some("mock-token-admin-123"))
            .times(1)
            .returning(|_| Ok(Envelope::ok(Value::Null)));

        let sessions = sessions();
        sessions.establish(identity(), "mock-token-admin-123").unwrap();

        let client = ApiClient::new(Arc::new(dispatcher), sessions);
        client.get("/courses").await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let mut dispatcher = MockDispatcher::new();
        dispatcher
            .expect_dispatch()
            .returning(|_| Err(AppError::Unauthorized("Unauthorized".into())));

        let sessions = sessions();
        sessions.establish(identity(), "mock-token-stale").unwrap();

        let client = ApiClient::new(Arc::new(dispatcher), sessions.clone());
        let err = client.get("/users/me").await.unwrap_err();
        assert_eq!(err.status(), 401);
        assert!(!sessions.is_authenticated());
    }

    #[tokio::test]
    async fn test_not_found_keeps_session() {
        let mut dispatcher = MockDispatcher::new();
        dispatcher
            .expect_dispatch()
            .returning(|_| Err(AppError::NotFound("Resource not found".into())));

        let sessions = sessions();
        sessions.establish(identity(), "mock-token-admin-123").unwrap();

        let client = ApiClient::new(Arc::new(dispatcher), sessions.clone());
        assert!(client.get("/courses/999").await.is_err());
        assert!(sessions.is_authenticated());
    }
}
