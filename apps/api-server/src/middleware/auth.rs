//! Caller identity extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use voice_core::domain::Caller;
use voice_core::ports::{AuthError, ClaimsReader};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller, read from the `Authorization: Bearer` token.
///
/// Use this to require an identity:
/// ```ignore
/// let Identity(caller) = Identity::extract(&req).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub Caller);

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let caller = bearer_token(req).and_then(|token| state.claims.read(token));

        ready(caller.map(Identity).map_err(|e| {
            tracing::debug!(error = %e, "Rejected caller identity");
            AppError::from(e)
        }))
    }
}
