//! 用户服务
//!
//! `/users` 的类型化包装。更新当前用户时同步刷新会话中的身份快照。

use serde_json::Value;
use urlencoding::encode;

use crate::error::Result;
use crate::models::{Identity, TokenWallet};
use crate::services::client::ApiClient;

const USERS_URL: &str = "/users";

/// 用户服务
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 当前令牌对应的用户
    pub async fn current(&self) -> Result<Identity> {
        self.client.get_json(&format!("{}/me", USERS_URL)).await
    }

    pub async fn by_id(&self, id: &str) -> Result<Identity> {
        self.client
            .get_json(&format!("{}/{}", USERS_URL, encode(id)))
            .await
    }

    pub async fn all(&self) -> Result<Vec<Identity>> {
        self.client.get_json(USERS_URL).await
    }

    /// 更新用户；目标为当前用户时刷新会话快照
    pub async fn update(&self, id: &str, patch: Value) -> Result<Value> {
        let path = format!("{}/{}", USERS_URL, encode(id));
        let payload = self.client.put(&path, patch.clone()).await?.into_payload();
        self.client.sessions().update_identity(id, &patch)?;
        Ok(payload)
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        let path = format!("{}/{}", USERS_URL, encode(id));
        Ok(self.client.delete(&path).await?.into_payload())
    }

    /// 代币钱包
    pub async fn wallet(&self, id: &str) -> Result<TokenWallet> {
        self.client
            .get_json(&format!("{}/{}/tokens", USERS_URL, encode(id)))
            .await
    }
}
