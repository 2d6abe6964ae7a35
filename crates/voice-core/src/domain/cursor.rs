use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::Post;
use crate::error::DomainError;

/// Opaque position in a recency-ordered listing.
///
/// Encodes the `(created_at, post_id)` of the last post on a page so the next
/// page can resume strictly after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub created_at: DateTime<Utc>,
    pub post_id: Uuid,
}

impl PageCursor {
    pub fn after(post: &Post) -> Self {
        Self {
            created_at: post.created_at,
            post_id: post.post_id,
        }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}:{}", self.created_at.timestamp_micros(), self.post_id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::Validation("Invalid nextToken".to_string());

        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (micros, id) = raw.split_once(':').ok_or_else(invalid)?;

        let micros: i64 = micros.parse().map_err(|_| invalid())?;
        let created_at = DateTime::from_timestamp_micros(micros).ok_or_else(invalid)?;
        let post_id = Uuid::parse_str(id).map_err(|_| invalid())?;

        Ok(Self {
            created_at,
            post_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_recovers_position() {
        let cursor = PageCursor {
            created_at: DateTime::from_timestamp_micros(1_718_000_000_123_456).unwrap(),
            post_id: Uuid::new_v4(),
        };

        assert_eq!(PageCursor::decode(&cursor.encode()).unwrap(), cursor);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(PageCursor::decode("not a token").is_err());
        // valid base64, wrong payload
        assert!(PageCursor::decode(&URL_SAFE_NO_PAD.encode(b"hello")).is_err());
    }
}
