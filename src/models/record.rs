//! 记录标识与实体 trait
//!
//! 所有集合中的记录都实现 [`Entity`]，分发器和标识解析器只依赖这个 trait。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 记录标识：数字 ID 或字符串键
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// 数字 ID，例如课程目录中的 `2`
    Numeric(u64),
    /// 字符串键，例如 `problem-1`
    Key(String),
}

impl RecordId {
    /// 数字形式；字符串键仅在全部为数字时可转换
    pub fn as_number(&self) -> Option<u64> {
        match self {
            RecordId::Numeric(n) => Some(*n),
            RecordId::Key(key) => parse_digits(key),
        }
    }

    /// 与路径片段比较
    pub fn matches_key(&self, segment: &str) -> bool {
        match self {
            RecordId::Numeric(n) => parse_digits(segment) == Some(*n),
            RecordId::Key(key) => key == segment,
        }
    }
}

/// 仅由 ASCII 数字组成时解析为 u64（不接受符号）
fn parse_digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Numeric(n) => write!(f, "{}", n),
            RecordId::Key(key) => write!(f, "{}", key),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Numeric(n)
    }
}

impl From<&str> for RecordId {
    fn from(key: &str) -> Self {
        RecordId::Key(key.to_string())
    }
}

/// 集合记录
///
/// 除 `id` 外的方法都有默认实现；过滤路由只会命中覆盖了对应属性的记录类型。
pub trait Entity: Serialize + Send + Sync {
    /// 唯一标识
    fn id(&self) -> RecordId;

    /// 可读标题，用于 slug 解析
    fn title(&self) -> Option<&str> {
        None
    }

    fn instructor(&self) -> Option<&str> {
        None
    }

    fn level(&self) -> Option<&str> {
        None
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &[]
    }

    fn is_featured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display_and_match() {
        let numeric = RecordId::from(5);
        assert_eq!(numeric.to_string(), "5");
        assert!(numeric.matches_key("5"));
        assert!(!numeric.matches_key("05x"));
        assert!(!numeric.matches_key("+5"));
        assert!(!numeric.matches_key(""));

        let key = RecordId::from("problem-1");
        assert_eq!(key.as_number(), None);
        assert_eq!(RecordId::from("+7").as_number(), None);
        assert_eq!(RecordId::from("42").as_number(), Some(42));
        assert!(key.matches_key("problem-1"));
    }

    #[test]
    fn test_record_id_untagged_serde() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[2, "admin-123"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Numeric(2), RecordId::Key("admin-123".into())]);
    }
}
