//! 种子数据
//!
//! 默认目录以 JSON 形式嵌入二进制，也可以通过配置替换为外部文件。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{Course, Document, Problem, TokenWallet, UserAccount};

/// 内置目录
pub const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// 目录文件结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub courses: Vec<Course>,
    pub problems: Vec<Problem>,
    pub users: Vec<UserAccount>,
    pub buildings: Vec<Document>,
    pub avatars: Vec<Document>,
    pub vr_sessions: Vec<Document>,
    pub classrooms: Vec<Document>,
    pub digital_twins: Vec<Document>,
    pub ai_companions: Vec<Document>,
    pub credentials: Vec<Document>,
    pub metaverse_events: Vec<Document>,
    pub code_visualizations: Vec<Document>,
    pub collab_sessions: Vec<Document>,
    pub tokens: Vec<TokenWallet>,
}

impl Catalog {
    /// 解析内置目录
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// 解析 JSON 文本
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 读取外部目录文件
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("无法读取目录文件 {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.courses.len(), 19);
        assert_eq!(catalog.problems.len(), 2);
        assert_eq!(catalog.users.len(), 2);
        assert_eq!(catalog.buildings.len(), 3);
        assert_eq!(catalog.tokens.len(), 2);
    }

    #[test]
    fn test_partial_catalog_defaults_missing_collections() {
        let catalog = Catalog::from_json(r#"{"courses": []}"#).unwrap();
        assert!(catalog.users.is_empty());
        assert!(catalog.vr_sessions.is_empty());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = Catalog::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
