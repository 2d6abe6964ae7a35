//! AI function: classify, moderate, embedding, sentiment.

use actix_web::{HttpRequest, HttpResponse, web};

use voice_shared::Envelope;
use voice_shared::dto::{ContentRequest, EmbeddingResponse, SentimentResponse};

use super::routing::AiRoute;
use super::{json_body, post_type_or_default, reply};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Any method on /ai/**
pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let route = AiRoute::resolve(req.method(), req.path());
    tracing::debug!(?route, path = %req.path(), "Dispatching AI request");

    let envelope = match route {
        AiRoute::Classify => classify(&state, json_body(&body)?).await?,
        AiRoute::Moderate => moderate(&state, json_body(&body)?).await,
        AiRoute::Embedding => embedding(&state, json_body(&body)?).await,
        AiRoute::Sentiment => sentiment(&state, json_body(&body)?).await?,
        AiRoute::NotFound => return Err(AppError::NotFound("Not found".to_string())),
        AiRoute::MethodNotAllowed => return Err(AppError::MethodNotAllowed),
    };

    Ok(reply(envelope))
}

/// POST /ai/classify  {"content": "...", "type": "good_thing"}
async fn classify(state: &AppState, request: ContentRequest) -> AppResult<Envelope> {
    let post_type = post_type_or_default(request.post_type.as_deref())?;
    let classification = state.ai.classify(&request.content, post_type).await;

    Ok(Envelope::ok(&classification))
}

/// POST /ai/moderate
async fn moderate(state: &AppState, request: ContentRequest) -> Envelope {
    Envelope::ok(&state.ai.moderate(&request.content).await)
}

/// POST /ai/embedding
async fn embedding(state: &AppState, request: ContentRequest) -> Envelope {
    Envelope::ok(&EmbeddingResponse {
        embedding: state.ai.embed(&request.content).await,
    })
}

/// POST /ai/sentiment. Unlike the others, a provider failure is a 500.
async fn sentiment(state: &AppState, request: ContentRequest) -> AppResult<Envelope> {
    let scores = state.ai.sentiment(&request.content).await?;

    Ok(Envelope::ok(&SentimentResponse {
        sentiment: scores.label.as_str().to_string(),
        positive_score: scores.positive,
        negative_score: scores.negative,
        neutral_score: scores.neutral,
        mixed_score: scores.mixed,
    }))
}
