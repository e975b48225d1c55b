//! 标识解析器
//!
//! 将路径参数（数字 ID 或可读 slug）解析为集合中的记录。
//! 按固定顺序尝试五种策略，命中即返回：
//!
//! 1. 纯数字：按数字 ID 精确匹配
//! 2. slug 精确匹配（小写，空白折叠为单个连字符）
//! 3. 严格 slug 精确匹配（非字母数字串折叠为连字符，去掉首尾连字符）
//! 4. 包含匹配：标题包含 slug，或去空白标题等于去连字符 slug
//! 5. 宽松回退：标题包含连字符替换为空格的标识，或标识包含去空白标题
//!
//! 步骤 3–5 可能同时命中多条记录，平局按集合顺序取第一条。

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::record::Entity;

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// 命中的策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    NumericId,
    ExactSlug,
    StrictSlug,
    Containment,
    Fallback,
}

/// 小写并将空白折叠为单个连字符
pub fn slugify(text: &str) -> String {
    WHITESPACE.replace_all(&text.to_lowercase(), "-").into_owned()
}

/// 小写，非字母数字串折叠为单个连字符，并去掉首尾连字符
pub fn strict_slug(text: &str) -> String {
    NON_ALNUM
        .replace_all(&text.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

fn strip_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

/// 解析标识，返回记录及命中的策略
pub fn resolve_with_step<'a, T: Entity>(
    identifier: &str,
    collection: &'a [T],
) -> Option<(&'a T, MatchStep)> {
    if NUMERIC.is_match(identifier) {
        // 超出 u64 范围的数字同样视为不存在
        let wanted: u64 = identifier.parse().ok()?;
        return collection
            .iter()
            .find(|record| record.id().as_number() == Some(wanted))
            .map(|record| (record, MatchStep::NumericId));
    }

    if identifier.is_empty() {
        return None;
    }

    let titled = || {
        collection
            .iter()
            .filter_map(|record| record.title().map(|title| (record, title)))
    };

    let slug = slugify(identifier);
    if let Some((record, _)) = titled().find(|(_, title)| slugify(title) == slug) {
        return Some((record, MatchStep::ExactSlug));
    }

    let strict = strict_slug(identifier);
    if let Some((record, _)) = titled().find(|(_, title)| strict_slug(title) == strict) {
        return Some((record, MatchStep::StrictSlug));
    }

    let dehyphenated = slug.replace('-', "");
    if let Some((record, _)) = titled().find(|(_, title)| {
        let lowered = title.to_lowercase();
        lowered.contains(&slug) || strip_whitespace(&lowered) == dehyphenated
    }) {
        return Some((record, MatchStep::Containment));
    }

    let lowered_identifier = identifier.to_lowercase();
    let spaced = lowered_identifier.replace('-', " ");
    titled()
        .find(|(_, title)| {
            let lowered = title.to_lowercase();
            lowered.contains(&spaced) || lowered_identifier.contains(&strip_whitespace(&lowered))
        })
        .map(|(record, _)| (record, MatchStep::Fallback))
}

/// 解析标识；确定性且总能结束，未命中返回 `None`
pub fn resolve<'a, T: Entity>(identifier: &str, collection: &'a [T]) -> Option<&'a T> {
    let resolved = resolve_with_step(identifier, collection);
    match &resolved {
        Some((record, step)) => debug!(identifier, id = %record.id(), ?step, "Identifier resolved"),
        None => debug!(identifier, "Identifier did not resolve"),
    }
    resolved.map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::RecordId;
    use rstest::rstest;
    use serde::Serialize;

    #[derive(Debug, Serialize, PartialEq)]
    struct Titled {
        id: u64,
        title: &'static str,
    }

    impl Entity for Titled {
        fn id(&self) -> RecordId {
            RecordId::Numeric(self.id)
        }

        fn title(&self) -> Option<&str> {
            Some(self.title)
        }
    }

    fn catalog() -> Vec<Titled> {
        vec![
            Titled { id: 1, title: "C for Beginners" },
            Titled { id: 2, title: "OOPs in C++" },
            Titled { id: 3, title: "Data Science Course" },
            Titled { id: 5, title: "DSA using C++" },
            Titled { id: 11, title: "Data Analytics & Visualization" },
            Titled { id: 18, title: "Generative AI & LLMs" },
        ]
    }

    #[test]
    fn test_slug_normalizations() {
        assert_eq!(slugify("OOPs in  C++"), "oops-in-c++");
        assert_eq!(strict_slug("Generative AI & LLMs"), "generative-ai-llms");
        assert_eq!(strict_slug("--Data  Analytics--"), "data-analytics");
    }

    #[rstest]
    #[case("2", 2, MatchStep::NumericId)]
    #[case("oops-in-c++", 2, MatchStep::ExactSlug)]
    #[case("OOPs in C++", 2, MatchStep::ExactSlug)]
    #[case("generative-ai-llms", 18, MatchStep::StrictSlug)]
    #[case("data-analytics-visualization", 11, MatchStep::StrictSlug)]
    #[case("oopsinc++", 2, MatchStep::Containment)]
    #[case("science", 3, MatchStep::Containment)]
    #[case("dsa-using", 5, MatchStep::Fallback)]
    #[case("best-dsausingc++-deal", 5, MatchStep::Fallback)]
    fn test_resolution_steps(
        #[case] identifier: &str,
        #[case] expected_id: u64,
        #[case] expected_step: MatchStep,
    ) {
        let courses = catalog();
        let (record, step) = resolve_with_step(identifier, &courses).unwrap();
        assert_eq!(record.id, expected_id);
        assert_eq!(step, expected_step);
    }

    #[rstest]
    #[case("nonexistent-xyz-123")]
    #[case("42")]
    #[case("99999999999999999999999")]
    #[case("")]
    fn test_unresolvable_identifiers(#[case] identifier: &str) {
        assert!(resolve(identifier, &catalog()).is_none());
    }

    #[test]
    fn test_ties_break_by_collection_order() {
        // "data" 同时包含于两个标题，取集合中的第一条
        let courses = catalog();
        assert_eq!(resolve("data", &courses).unwrap().id, 3);
    }

    #[test]
    fn test_every_record_round_trips() {
        let courses = catalog();
        for course in &courses {
            assert_eq!(resolve(&course.id.to_string(), &courses), Some(course));
            assert_eq!(resolve(&slugify(course.title), &courses), Some(course));
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let courses = catalog();
        let first = resolve_with_step("c++", &courses);
        for _ in 0..5 {
            assert_eq!(resolve_with_step("c++", &courses), first);
        }
    }
}
