//! Caller identity port.
//!
//! Tokens are issued and verified upstream by the identity provider; this
//! system only reads the claims they carry.

use crate::domain::Caller;

/// Reads the caller identity out of a bearer token.
pub trait ClaimsReader: Send + Sync {
    fn read(&self, token: &str) -> Result<Caller, AuthError>;
}

/// Identity errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}
