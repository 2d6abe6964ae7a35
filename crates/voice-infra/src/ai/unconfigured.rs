//! Stand-in provider used when no AI credentials are configured.

use async_trait::async_trait;

use voice_core::domain::SentimentScores;
use voice_core::error::AiError;
use voice_core::ports::{Embedder, SentimentDetector, TextGenerator};

/// Fails every call with [`AiError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredAi;

#[async_trait]
impl TextGenerator for UnconfiguredAi {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AiError> {
        Err(AiError::NotConfigured)
    }
}

#[async_trait]
impl Embedder for UnconfiguredAi {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AiError> {
        Err(AiError::NotConfigured)
    }
}

#[async_trait]
impl SentimentDetector for UnconfiguredAi {
    async fn detect(&self, _text: &str) -> Result<SentimentScores, AiError> {
        Err(AiError::NotConfigured)
    }
}
