//! AI gateway - classification, moderation, embeddings and sentiment.
//!
//! Every operation except [`AiGateway::sentiment`] absorbs dependency
//! failures through [`or_fallback`] and returns a safe default.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::fallback::or_fallback;
use super::json_extract::extract_json_object;
use crate::domain::{Category, Classification, ModerationVerdict, PostType, SentimentScores};
use crate::error::AiError;
use crate::ports::{Embedder, SentimentDetector, TextGenerator};

/// Negative sentiment above this forces a post to be flagged.
pub const NEGATIVE_OVERRIDE_THRESHOLD: f64 = 0.8;

const HIGH_NEGATIVE_NOTE: &str = "High negative sentiment";
const CLASSIFY_MAX_TOKENS: u32 = 100;
const MODERATE_MAX_TOKENS: u32 = 200;

/// Facade over the external text-intelligence services.
pub struct AiGateway {
    generator: Arc<dyn TextGenerator>,
    embedder: Arc<dyn Embedder>,
    sentiment: Arc<dyn SentimentDetector>,
}

impl AiGateway {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        embedder: Arc<dyn Embedder>,
        sentiment: Arc<dyn SentimentDetector>,
    ) -> Self {
        Self {
            generator,
            embedder,
            sentiment,
        }
    }

    /// Assign `content` to one of the categories of `post_type`.
    ///
    /// The result is always a member of that set. `{other, 0.0}` when the
    /// model is unreachable, `{other, 0.5}` when it replied without JSON.
    pub async fn classify(&self, content: &str, post_type: PostType) -> Classification {
        let prompt = classification_prompt(content, post_type);

        or_fallback(
            "classify",
            async {
                let reply = self.generator.generate(&prompt, CLASSIFY_MAX_TOKENS).await?;
                Ok::<_, AiError>(parse_classification(&reply, post_type))
            },
            Classification::unavailable,
        )
        .await
    }

    /// Decide whether `content` must be rejected.
    ///
    /// Combines the model verdict with the negative-sentiment override.
    /// Fails open when neither signal is available.
    pub async fn moderate(&self, content: &str) -> ModerationVerdict {
        let negative = or_fallback(
            "moderate.sentiment",
            async { self.sentiment.detect(content).await.map(|s| Some(s.negative)) },
            || None,
        )
        .await;

        let prompt = moderation_prompt(content);
        let model_verdict = or_fallback(
            "moderate.model",
            async {
                let reply = self.generator.generate(&prompt, MODERATE_MAX_TOKENS).await?;
                Ok::<_, AiError>(extract_json_object(&reply).map(|obj| parse_verdict(&obj)))
            },
            || None,
        )
        .await;

        let verdict = combine_verdicts(model_verdict, negative);
        if verdict.is_inappropriate {
            tracing::info!(reason = ?verdict.reason, "Content flagged by moderation");
        }
        verdict
    }

    /// Embedding of `content`; empty on failure.
    pub async fn embed(&self, content: &str) -> Vec<f32> {
        or_fallback("embed", self.embedder.embed(content), Vec::new).await
    }

    /// Sentiment scores. Unlike the other operations, failures are returned.
    pub async fn sentiment(&self, content: &str) -> Result<SentimentScores, AiError> {
        self.sentiment.detect(content).await
    }
}

fn classification_prompt(content: &str, post_type: PostType) -> String {
    let categories = Category::for_type(post_type)
        .iter()
        .map(|c| format!("- {}: {}", c.as_str(), c.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "あなたは投稿を分類するAIアシスタントです。\n\
         以下の投稿を最も適切なカテゴリに分類してください。\n\n\
         カテゴリ一覧:\n{categories}\n\n\
         投稿内容:\n{content}\n\n\
         JSONで回答してください:\n\
         {{\"category\": \"カテゴリ名\", \"confidence\": 0.0-1.0}}"
    )
}

fn moderation_prompt(content: &str) -> String {
    format!(
        "以下のテキストが不適切かどうか判定してください。\n\
         不適切な内容とは、暴力的、差別的、性的、誹謗中傷などを含むものです。\n\n\
         テキスト:\n{content}\n\n\
         JSONで回答してください:\n\
         {{\"isInappropriate\": true/false, \"reason\": \"理由（不適切な場合のみ）\", \"confidence\": 0.0-1.0}}"
    )
}

fn parse_classification(reply: &str, post_type: PostType) -> Classification {
    let Some(obj) = extract_json_object(reply) else {
        tracing::debug!("Classification reply contained no JSON object");
        return Classification::unparsable();
    };

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .map(|label| Category::resolve(label, post_type))
        .unwrap_or(Category::Other);

    Classification {
        category,
        confidence: unit_score(&obj, "confidence"),
    }
}

fn parse_verdict(obj: &Map<String, Value>) -> ModerationVerdict {
    ModerationVerdict {
        is_inappropriate: obj
            .get("isInappropriate")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        reason: obj
            .get("reason")
            .and_then(Value::as_str)
            .filter(|r| !r.trim().is_empty())
            .map(str::to_string),
        confidence: unit_score(obj, "confidence"),
    }
}

/// Model verdict OR-ed with the negative-sentiment override.
fn combine_verdicts(model: Option<ModerationVerdict>, negative: Option<f64>) -> ModerationVerdict {
    let overridden = negative.is_some_and(|n| n > NEGATIVE_OVERRIDE_THRESHOLD);

    match (model, negative) {
        (Some(mut verdict), _) => {
            if overridden {
                verdict.is_inappropriate = true;
                // a model verdict without a reason still gets the suffix verbatim
                let reason = verdict.reason.take().unwrap_or_default();
                verdict.reason = Some(format!("{} ({})", reason, HIGH_NEGATIVE_NOTE));
            }
            verdict
        }
        (None, Some(score)) => ModerationVerdict {
            is_inappropriate: overridden,
            reason: overridden.then(|| HIGH_NEGATIVE_NOTE.to_string()),
            confidence: score,
        },
        (None, None) => ModerationVerdict::allow(),
    }
}

fn unit_score(obj: &Map<String, Value>, key: &str) -> f64 {
    obj.get(key)
        .and_then(Value::as_f64)
        .map(|v| v.clamp(0.0, 1.0))
        .unwrap_or(0.0)
}
