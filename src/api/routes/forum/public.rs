//! Public types for the forum API
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePostRequest {
    pub user_id: i64,
    pub content: String,
    pub additional_metadata: Option<Value>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePostRequest {
    pub content: Option<String>,
    pub additional_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ForumPostResponse {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ListPostsResponse {
    pub data: Vec<ForumPostResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}
