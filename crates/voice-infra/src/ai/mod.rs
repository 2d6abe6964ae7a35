//! AI provider implementations.

mod openai;
mod sentiment;
mod unconfigured;

pub use openai::{AiConfig, OpenAiClient};
pub use sentiment::ModelSentimentDetector;
pub use unconfigured::UnconfiguredAi;
