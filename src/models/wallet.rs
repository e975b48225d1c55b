//! 学习代币钱包

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::record::{Entity, RecordId};

/// 交易类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Earn,
    Spend,
}

/// 代币交易
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: i64,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// 用户钱包
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenWallet {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub balance: i64,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl TokenWallet {
    /// 用户尚无钱包时返回的空钱包
    pub fn empty(user_id: &str) -> Self {
        Self {
            id: None,
            user_id: user_id.to_string(),
            balance: 0,
            transactions: Vec::new(),
        }
    }
}

impl Entity for TokenWallet {
    fn id(&self) -> RecordId {
        match &self.id {
            Some(id) => RecordId::Key(id.clone()),
            None => RecordId::Key(format!("wallet-{}", self.user_id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_wallet_shape() {
        let json = serde_json::to_value(TokenWallet::empty("ghost-1")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"userId": "ghost-1", "balance": 0, "transactions": []})
        );
    }
}
