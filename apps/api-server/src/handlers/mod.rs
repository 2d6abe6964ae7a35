//! HTTP handlers and route configuration.

mod ai;
mod health;
mod posts;
pub mod routing;

#[cfg(test)]
mod tests;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::de::DeserializeOwned;

use voice_core::DomainError;
use voice_core::domain::PostType;
use voice_shared::Envelope;

use crate::middleware::error::{AppError, AppResult};

/// Configure all application routes.
///
/// `/posts/**` and `/ai/**` each go to a single dispatcher that picks the
/// operation from method and path.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .service(web::scope("/posts").default_service(web::to(posts::dispatch)))
        .service(web::scope("/ai").default_service(web::to(ai::dispatch)));
}

/// Turn an envelope into an actix response.
pub(crate) fn reply(envelope: Envelope) -> HttpResponse {
    let status =
        StatusCode::from_u16(envelope.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = HttpResponse::build(status);
    for (name, value) in envelope.headers {
        builder.insert_header((name, value));
    }
    builder.body(envelope.body)
}

/// Parse a JSON request body. An empty body reads as `T::default()`.
fn json_body<T: DeserializeOwned + Default>(body: &[u8]) -> AppResult<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))
}

/// `type` from a request, defaulting to `good_thing` when absent.
fn post_type_or_default(raw: Option<&str>) -> Result<PostType, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.parse(),
        None => Ok(PostType::default()),
    }
}
