//! 集合查询：属性过滤与分页

use serde::{Deserialize, Serialize};

use crate::models::record::Entity;

/// 属性过滤条件
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// 讲师精确匹配
    Instructor(String),
    /// 级别，忽略大小写
    Level(String),
    /// 分类，忽略大小写
    Category(String),
    /// 任一标签命中
    Tags(Vec<String>),
    /// 标题包含，忽略大小写
    TitleContains(String),
    /// 推荐记录
    Featured,
}

impl Filter {
    /// 从逗号分隔的字符串构造标签过滤
    pub fn tags_from_csv(csv: &str) -> Self {
        Filter::Tags(
            csv.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// 记录是否满足条件
    pub fn accepts<T: Entity>(&self, record: &T) -> bool {
        match self {
            Filter::Instructor(name) => record.instructor() == Some(name.as_str()),
            Filter::Level(level) => record
                .level()
                .is_some_and(|value| value.eq_ignore_ascii_case(level)),
            Filter::Category(category) => record
                .category()
                .is_some_and(|value| value.eq_ignore_ascii_case(category)),
            Filter::Tags(wanted) => record.tags().iter().any(|tag| wanted.contains(tag)),
            Filter::TitleContains(needle) => record
                .title()
                .is_some_and(|title| title.to_lowercase().contains(&needle.to_lowercase())),
            Filter::Featured => record.is_featured(),
        }
    }
}

/// 分页参数（页码从 0 开始）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 页码
    pub page: usize,
    /// 每页数量
    pub size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 0, size: 10 }
    }
}

impl Pagination {
    /// 创建新分页参数，`size` 为 0 时使用默认值
    pub fn new(page: usize, size: usize) -> Self {
        let size = if size == 0 { Self::default().size } else { size };
        Self { page, size }
    }

    /// 计算偏移量
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// 从完整列表切出一页
    pub fn slice(records: &[T], pagination: Pagination) -> Self {
        // 直接构造的参数可能绕过 `new`
        let pagination = Pagination::new(pagination.page, pagination.size);
        let total_elements = records.len();
        let content = records
            .iter()
            .skip(pagination.offset())
            .take(pagination.size)
            .cloned()
            .collect();

        Self {
            content,
            page: pagination.page,
            size: pagination.size,
            total_elements,
            total_pages: total_elements.div_ceil(pagination.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_slices_and_counts() {
        let records: Vec<u32> = (1..=23).collect();
        let page = Page::slice(&records, Pagination::new(2, 10));
        assert_eq!(page.content, vec![21, 22, 23]);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.total_pages, 3);

        let beyond = Page::slice(&records, Pagination::new(9, 10));
        assert!(beyond.content.is_empty());
    }

    #[test]
    fn test_zero_size_uses_default() {
        assert_eq!(Pagination::new(0, 0).size, 10);

        let records: Vec<u32> = (1..=12).collect();
        let page = Page::slice(&records, Pagination { page: 0, size: 0 });
        assert_eq!(page.size, 10);
        assert_eq!(page.content.len(), 10);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_tags_from_csv_trims_empty_entries() {
        assert_eq!(
            Filter::tags_from_csv("Python, SQL,,"),
            Filter::Tags(vec!["Python".into(), "SQL".into()])
        );
    }
}
