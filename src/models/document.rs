//! 通用文档记录
//!
//! 沉浸式学习相关的集合（虚拟校园、VR 会话、数字孪生等）结构各异，
//! 统一以 `id` + `name` + 扁平化属性表示。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::record::{Entity, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Document {
    /// 读取字符串属性
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }
}

impl Entity for Document {
    fn id(&self) -> RecordId {
        RecordId::Key(self.id.clone())
    }

    fn title(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn level(&self) -> Option<&str> {
        self.attribute_str("level")
    }

    fn category(&self) -> Option<&str> {
        self.attribute_str("category")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_attributes_round_through_serde() {
        let doc: Document = serde_json::from_value(serde_json::json!({
            "id": "bldg-1",
            "name": "Computer Science Hall",
            "model": "building-cs",
            "position": {"x": 0, "y": 0, "z": -10}
        }))
        .unwrap();

        assert_eq!(doc.attribute_str("model"), Some("building-cs"));
        assert_eq!(doc.title(), Some("Computer Science Hall"));

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["position"]["z"], -10);
    }
}
