//! Health check endpoint.

use actix_web::HttpResponse;
use serde::Serialize;
use voice_shared::Envelope;

use super::reply;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    reply(Envelope::ok(&response))
}
