//! 编程练习题数据模型

use serde::{Deserialize, Serialize};

use crate::models::record::{Entity, RecordId};

/// 测试用例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

/// 练习题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 难度（Easy / Medium / Hard），作为 level 参与过滤
    pub difficulty: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attempt_count: u64,
    #[serde(default)]
    pub solve_count: u64,
    pub author_id: String,
    #[serde(default)]
    pub sample_input: String,
    #[serde(default)]
    pub sample_output: String,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Problem {
    /// 通过率
    pub fn solve_rate(&self) -> f64 {
        if self.attempt_count == 0 {
            return 0.0;
        }
        self.solve_count as f64 / self.attempt_count as f64
    }
}

impl Entity for Problem {
    fn id(&self) -> RecordId {
        RecordId::Key(self.id.clone())
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn level(&self) -> Option<&str> {
        Some(&self.difficulty)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}
