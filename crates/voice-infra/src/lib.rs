//! # Voice Infrastructure
//!
//! Concrete implementations of the ports defined in `voice-core`:
//! the post store, the AI providers and the claims reader.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory post store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod ai;
pub mod auth;
pub mod database;

// Re-exports - In-Memory
pub use database::InMemoryPostRepository;

pub use ai::{AiConfig, ModelSentimentDetector, OpenAiClient, UnconfiguredAi};
pub use auth::JwtClaimsReader;

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
