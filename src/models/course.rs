//! 课程数据模型

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::record::{Entity, RecordId};

/// 报名状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    Open,
    Closed,
    #[serde(rename = "Coming Soon")]
    ComingSoon,
}

/// 课程
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// 数字 ID
    pub id: u64,
    /// 课程标题
    pub title: String,
    /// 分类（小写连字符形式，例如 `data-science`）
    pub category: String,
    /// 难度级别
    pub level: String,
    pub duration: String,
    pub lectures: u32,
    /// 展示价格（含货币符号）
    pub price: String,
    /// 讲师姓名
    pub instructor: String,
    pub rating: f32,
    pub students: u32,
    pub description: String,
    pub image: String,
    /// 营销标签，例如 `Popular`
    #[serde(default)]
    pub tag: Option<String>,
    /// 技能列表，同时作为标签过滤的依据
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub enrollment_status: Option<EnrollmentStatus>,
    /// 是否为推荐课程
    #[serde(default)]
    pub is_featured: bool,
}

impl Entity for Course {
    fn id(&self) -> RecordId {
        RecordId::Numeric(self.id)
    }

    fn title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn instructor(&self) -> Option<&str> {
        Some(&self.instructor)
    }

    fn level(&self) -> Option<&str> {
        Some(&self.level)
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn tags(&self) -> &[String] {
        &self.skills
    }

    fn is_featured(&self) -> bool {
        self.is_featured
    }
}
