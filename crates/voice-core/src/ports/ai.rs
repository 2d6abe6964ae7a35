//! External text-intelligence services.

use async_trait::async_trait;

use crate::domain::SentimentScores;
use crate::error::AiError;

/// A text-generation model. Returns the raw completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, AiError>;
}

/// An embedding model.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AiError>;
}

/// A sentiment analysis service.
#[async_trait]
pub trait SentimentDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<SentimentScores, AiError>;
}
