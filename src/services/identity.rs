//! 身份解析器
//!
//! 令牌按约定为 `mock-token-{user_id}`，解析是反向查找而不是校验，
//! 不提供任何真实的安全保证。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::Identity;
use crate::storage::ResourceStore;

/// 令牌前缀
pub const TOKEN_PREFIX: &str = "mock-token-";

/// 令牌 ↔ 身份
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// 为身份签发令牌
    fn mint(&self, identity: &Identity) -> String;

    /// 令牌对应的身份，未知令牌为 `Unauthorized`
    async fn identity_for(&self, token: &str) -> Result<Identity>;
}

/// 基于资源仓库用户集合的解析器
pub struct StoreIdentityResolver {
    store: Arc<ResourceStore>,
}

impl StoreIdentityResolver {
    pub fn new(store: Arc<ResourceStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityResolver for StoreIdentityResolver {
    fn mint(&self, identity: &Identity) -> String {
        format!("{}{}", TOKEN_PREFIX, identity.id)
    }

    async fn identity_for(&self, token: &str) -> Result<Identity> {
        let identity = token
            .strip_prefix(TOKEN_PREFIX)
            .and_then(|user_id| self.store.identity(user_id))
            .cloned();

        match identity {
            Some(identity) => Ok(identity),
            None => {
                debug!("Unknown token presented");
                Err(AppError::Unauthorized("Unauthorized".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> StoreIdentityResolver {
        StoreIdentityResolver::new(Arc::new(ResourceStore::seeded().unwrap()))
    }

    #[tokio::test]
    async fn test_minted_token_resolves_back() {
        let resolver = resolver();
        let student = resolver.identity_for("mock-token-student-456").await.unwrap();
        assert_eq!(resolver.mint(&student), "mock-token-student-456");
        assert_eq!(student.email, "student@gmail.com");
    }

    #[tokio::test]
    async fn test_unknown_tokens_are_unauthorized() {
        let resolver = resolver();
        for token in ["mock-token-ghost", "student-456", ""] {
            let err = resolver.identity_for(token).await.unwrap_err();
            assert!(err.is_unauthorized());
        }
    }
}
