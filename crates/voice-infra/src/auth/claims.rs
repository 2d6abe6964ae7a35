//! Bearer-token claims reader.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use voice_core::domain::Caller;
use voice_core::ports::{AuthError, ClaimsReader};

#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    sub: String,
}

/// Reads the `sub` claim of a JWT issued by the upstream identity provider.
///
/// The API gateway in front of this service has already verified the
/// signature and expiry, so only the payload is decoded here.
pub struct JwtClaimsReader {
    validation: Validation,
    key: DecodingKey,
}

impl JwtClaimsReader {
    pub fn new() -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            validation,
            key: DecodingKey::from_secret(&[]),
        }
    }
}

impl Default for JwtClaimsReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimsReader for JwtClaimsReader {
    fn read(&self, token: &str) -> Result<Caller, AuthError> {
        let data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let sub = data.claims.sub.trim();
        if sub.is_empty() {
            return Err(AuthError::InvalidToken("Missing subject claim".to_string()));
        }

        Ok(Caller::new(sub))
    }
}
