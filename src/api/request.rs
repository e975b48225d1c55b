//! 请求描述
//!
//! 由调用方构造，分发器只读不改。

use derive_more::Display;
use serde_json::Value;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::AppError;

/// 请求方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verb {
    #[display("GET")]
    Get,
    #[display("POST")]
    Post,
    #[display("PUT")]
    Put,
    #[display("DELETE")]
    Delete,
}

impl FromStr for Verb {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            other => Err(AppError::Internal(format!("unsupported verb: {}", other))),
        }
    }
}

/// 请求描述
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub verb: Verb,
    /// 以 `/` 开头的路径，可带查询串
    pub path: String,
    pub body: Option<Value>,
    /// Bearer 令牌
    pub token: Option<String>,
}

impl Request {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            body: None,
            token: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Verb::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Verb::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 非空令牌
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }
}

/// 解析后的路径：解码后的片段与查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestPath {
    pub segments: Vec<String>,
    pub query: HashMap<String, String>,
}

impl RequestPath {
    /// 解析路径；`base_path` 存在且为前缀时先剥离
    pub fn parse(path: &str, base_path: Option<&str>) -> Self {
        let (raw_path, raw_query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let raw_path = base_path
            .map(|base| base.trim_end_matches('/'))
            .filter(|base| !base.is_empty())
            .and_then(|base| raw_path.strip_prefix(base))
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(raw_path);

        let segments = raw_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(decode_component)
            .collect();

        let query = raw_query
            .map(|q| {
                q.split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| match pair.split_once('=') {
                        Some((k, v)) => (decode_query(k), decode_query(v)),
                        None => (decode_query(pair), String::new()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { segments, query }
    }

    /// 非空查询参数
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// 最后一个路径片段
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

fn decode_query(raw: &str) -> String {
    decode_component(&raw.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments_and_query() {
        let path = RequestPath::parse("/courses/search?title=Data%20Science&x=1", None);
        assert_eq!(path.segments, vec!["courses", "search"]);
        assert_eq!(path.query_value("title"), Some("Data Science"));
        assert_eq!(path.query_value("missing"), None);
    }

    #[test]
    fn test_plus_decodes_to_space_in_query() {
        let path = RequestPath::parse("/courses/search?title=java+for", None);
        assert_eq!(path.query_value("title"), Some("java for"));
    }

    #[test]
    fn test_base_path_is_stripped() {
        let path = RequestPath::parse("/api/v1/courses/5", Some("/api/v1"));
        assert_eq!(path.segments, vec!["courses", "5"]);
        assert_eq!(path.last_segment(), Some("5"));

        let untouched = RequestPath::parse("/courses/5", Some("/api/v1"));
        assert_eq!(untouched.segments, vec!["courses", "5"]);
    }

    #[test]
    fn test_percent_encoded_segment() {
        let path = RequestPath::parse("/courses/instructor/Rajesh%20Kumar", None);
        assert_eq!(path.segments[2], "Rajesh Kumar");
    }

    #[test]
    fn test_verb_parsing() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!(Verb::Delete.to_string(), "DELETE");
        assert!("PATCH".parse::<Verb>().is_err());
    }
}
