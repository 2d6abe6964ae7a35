//! Uniform response envelope: status, CORS headers, JSON body.

use serde::{Deserialize, Serialize};

/// Headers attached to every response.
pub const DEFAULT_HEADERS: [(&str, &str); 3] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
];

/// Transport-neutral HTTP response.
///
/// The body is already serialized; timestamps and ids go through their
/// string representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Envelope {
    /// Build an envelope around `body`. Never fails: a body that cannot be
    /// serialized is replaced by an error object.
    pub fn json<T: Serialize + ?Sized>(status_code: u16, body: &T) -> Self {
        let body = serde_json::to_string(body).unwrap_or_else(|e| {
            serde_json::json!({ "error": format!("Response serialization failed: {}", e) })
                .to_string()
        });

        Self {
            status_code,
            headers: DEFAULT_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body,
        }
    }

    pub fn ok<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(200, body)
    }

    pub fn created<T: Serialize + ?Sized>(body: &T) -> Self {
        Self::json(201, body)
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::json(status_code, &ErrorBody::new(message))
    }
}

/// Error payload: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
