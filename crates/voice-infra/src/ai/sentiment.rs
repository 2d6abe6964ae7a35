//! Sentiment detection backed by a text-generation model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use voice_core::domain::{SentimentLabel, SentimentScores};
use voice_core::error::AiError;
use voice_core::ports::{SentimentDetector, TextGenerator};
use voice_core::services::extract_json;

const SENTIMENT_MAX_TOKENS: u32 = 150;

#[derive(Debug, Deserialize)]
struct RawScores {
    sentiment: SentimentLabel,
    #[serde(default)]
    positive: f64,
    #[serde(default)]
    negative: f64,
    #[serde(default)]
    neutral: f64,
    #[serde(default)]
    mixed: f64,
}

/// Asks the chat model for a Japanese-language sentiment breakdown.
pub struct ModelSentimentDetector {
    generator: Arc<dyn TextGenerator>,
}

impl ModelSentimentDetector {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    fn prompt(text: &str) -> String {
        format!(
            "以下の日本語の文章の感情を分析してください。\n\n\
             文章: {text}\n\n\
             以下のJSON形式のみで回答してください:\n\
             {{\"sentiment\": \"POSITIVE|NEGATIVE|NEUTRAL|MIXED\", \
             \"positive\": 0.0-1.0, \"negative\": 0.0-1.0, \
             \"neutral\": 0.0-1.0, \"mixed\": 0.0-1.0}}"
        )
    }
}

fn parse_scores(reply: &str) -> Result<SentimentScores, AiError> {
    let raw: RawScores = extract_json(reply).ok_or_else(|| {
        AiError::MalformedResponse("No sentiment object in model reply".to_string())
    })?;

    Ok(SentimentScores {
        label: raw.sentiment,
        positive: raw.positive.clamp(0.0, 1.0),
        negative: raw.negative.clamp(0.0, 1.0),
        neutral: raw.neutral.clamp(0.0, 1.0),
        mixed: raw.mixed.clamp(0.0, 1.0),
    })
}

#[async_trait]
impl SentimentDetector for ModelSentimentDetector {
    async fn detect(&self, text: &str) -> Result<SentimentScores, AiError> {
        let reply = self
            .generator
            .generate(&Self::prompt(text), SENTIMENT_MAX_TOKENS)
            .await?;
        parse_scores(&reply)
    }
}
