//! Data Transfer Objects - request/response types for the API.
//!
//! Enumerated fields (`type`, `sort`, `category`) travel as strings and are
//! parsed by the handlers.

use serde::{Deserialize, Serialize};

/// POST /posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// Body of the AI endpoints. `type` is only read by /ai/classify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// GET /posts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsParams {
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<usize>,
    pub next_token: Option<String>,
}

/// GET /posts/{id}/similar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimilarParams {
    pub limit: Option<usize>,
}

/// GET /posts/search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub post_type: Option<String>,
    pub category: Option<String>,
}

/// GET /posts: one page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPageResponse<P> {
    pub posts: Vec<P>,
    pub next_token: Option<String>,
}

/// Similar, search and own-posts listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsResponse<P> {
    pub posts: Vec<P>,
}

/// Plain acknowledgement, e.g. after a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /ai/embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
}

/// POST /ai/sentiment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResponse {
    pub sentiment: String,
    pub positive_score: f64,
    pub negative_score: f64,
    pub neutral_score: f64,
    pub mixed_score: f64,
}
