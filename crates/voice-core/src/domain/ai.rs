//! Results returned by the AI gateway.

use serde::{Deserialize, Serialize};

use super::Category;

/// Outcome of automatic classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub confidence: f64,
}

impl Classification {
    /// No signal from the model at all.
    pub fn unavailable() -> Self {
        Self {
            category: Category::Other,
            confidence: 0.0,
        }
    }

    /// The model answered, but not in a parsable shape.
    pub fn unparsable() -> Self {
        Self {
            category: Category::Other,
            confidence: 0.5,
        }
    }
}

/// Moderation decision for a piece of content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationVerdict {
    pub is_inappropriate: bool,
    pub reason: Option<String>,
    pub confidence: f64,
}

impl ModerationVerdict {
    /// Fail-open verdict used when no moderation signal is available.
    pub fn allow() -> Self {
        Self {
            is_inappropriate: false,
            reason: None,
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Mixed,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Mixed => "MIXED",
        }
    }
}

/// Sentiment scores, each in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub label: SentimentLabel,
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
    pub mixed: f64,
}
