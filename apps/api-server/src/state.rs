//! Application state - shared across all handlers.

use std::sync::Arc;

use voice_core::ports::{ClaimsReader, Embedder, PostRepository, SentimentDetector, TextGenerator};
use voice_core::{AiGateway, PostService};
use voice_infra::database::DatabaseConfig;
use voice_infra::{
    AiConfig, InMemoryPostRepository, JwtClaimsReader, ModelSentimentDetector, OpenAiClient,
    UnconfiguredAi,
};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub ai: Arc<AiGateway>,
    pub claims: Arc<dyn ClaimsReader>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let repo = post_repository(config.database.as_ref()).await;
        let ai = Arc::new(ai_gateway(&config.ai));

        tracing::info!("Application state initialized");

        Self::from_parts(repo, ai, Arc::new(JwtClaimsReader::new()))
    }

    pub fn from_parts(
        repo: Arc<dyn PostRepository>,
        ai: Arc<AiGateway>,
        claims: Arc<dyn ClaimsReader>,
    ) -> Self {
        let posts = Arc::new(PostService::new(repo, ai.clone()));
        Self { posts, ai, claims }
    }
}

fn ai_gateway(config: &AiConfig) -> AiGateway {
    match OpenAiClient::from_config(config) {
        Some(client) => {
            tracing::info!(
                base_url = %config.base_url,
                chat_model = %config.chat_model,
                embedding_model = %config.embedding_model,
                "AI provider configured"
            );
            let client = Arc::new(client);
            let generator: Arc<dyn TextGenerator> = client.clone();
            let embedder: Arc<dyn Embedder> = client;
            let sentiment: Arc<dyn SentimentDetector> =
                Arc::new(ModelSentimentDetector::new(generator.clone()));
            AiGateway::new(generator, embedder, sentiment)
        }
        None => {
            tracing::warn!("AI_API_KEY not set. AI features will fall back to defaults.");
            let ai = Arc::new(UnconfiguredAi);
            AiGateway::new(ai.clone(), ai.clone(), ai)
        }
    }
}

#[cfg(feature = "postgres")]
async fn post_repository(db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
    use voice_infra::PostgresPostRepository;
    use voice_infra::database::connect;

    let Some(config) = db_config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Arc::new(InMemoryPostRepository::new());
    };

    match connect(config).await {
        Ok(conn) => Arc::new(PostgresPostRepository::new(conn)),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            Arc::new(InMemoryPostRepository::new())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn post_repository(_db_config: Option<&DatabaseConfig>) -> Arc<dyn PostRepository> {
    tracing::info!("Running without postgres feature - using in-memory repository");
    Arc::new(InMemoryPostRepository::new())
}
