//! 课程服务
//!
//! `/courses` 的类型化包装。

use serde_json::Value;
use urlencoding::encode;

use crate::error::Result;
use crate::models::Course;
use crate::services::client::ApiClient;
use crate::storage::Page;

const COURSES_URL: &str = "/courses";

/// 课程服务
#[derive(Clone)]
pub struct CourseService {
    client: ApiClient,
}

impl CourseService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn all(&self) -> Result<Vec<Course>> {
        self.client.get_json(COURSES_URL).await
    }

    /// 分页，页码从 0 开始
    pub async fn paginated(&self, page: usize, size: usize) -> Result<Page<Course>> {
        self.client
            .get_json(&format!("{}/paginated?page={}&size={}", COURSES_URL, page, size))
            .await
    }

    /// 数字 ID 或 slug
    pub async fn by_id(&self, identifier: &str) -> Result<Course> {
        self.client
            .get_json(&format!("{}/{}", COURSES_URL, encode(identifier)))
            .await
    }

    pub async fn create(&self, course: Value) -> Result<Value> {
        Ok(self.client.post(COURSES_URL, course).await?.into_payload())
    }

    pub async fn update(&self, identifier: &str, course: Value) -> Result<Value> {
        let path = format!("{}/{}", COURSES_URL, encode(identifier));
        Ok(self.client.put(&path, course).await?.into_payload())
    }

    pub async fn delete(&self, identifier: &str) -> Result<Value> {
        let path = format!("{}/{}", COURSES_URL, encode(identifier));
        Ok(self.client.delete(&path).await?.into_payload())
    }

    pub async fn by_instructor(&self, instructor: &str) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/instructor/{}", COURSES_URL, encode(instructor)))
            .await
    }

    pub async fn by_level(&self, level: &str) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/level/{}", COURSES_URL, encode(level)))
            .await
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/category/{}", COURSES_URL, encode(category)))
            .await
    }

    /// 任一标签命中
    pub async fn by_tags(&self, tags: &[&str]) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/tags?tags={}", COURSES_URL, encode(&tags.join(","))))
            .await
    }

    pub async fn search(&self, title: &str) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/search?title={}", COURSES_URL, encode(title)))
            .await
    }

    pub async fn featured(&self) -> Result<Vec<Course>> {
        self.client
            .get_json(&format!("{}/featured", COURSES_URL))
            .await
    }
}
