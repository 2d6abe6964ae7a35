use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;
use crate::error::DomainError;

/// Upper bound on post length, counted in characters after trimming.
pub const MAX_CONTENT_CHARS: usize = 300;

/// The two kinds of post a user can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// Something good that happened today.
    #[default]
    GoodThing,
    /// How the user would like the world to be.
    IdealWorld,
}

impl PostType {
    pub const ALL: [PostType; 2] = [PostType::GoodThing, PostType::IdealWorld];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::GoodThing => "good_thing",
            PostType::IdealWorld => "ideal_world",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("Unknown post type: {}", s)))
    }
}

/// Post entity - an immutable text item, removable only by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: Uuid,
    pub user_id: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub content: String,
    pub category: Category,
    pub embedding: Vec<f32>,
    pub is_visible: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new visible post with a fresh id and timestamp.
    ///
    /// `content` is expected to have passed [`validate_content`].
    pub fn new(
        user_id: String,
        post_type: PostType,
        content: String,
        category: Category,
        embedding: Vec<f32>,
    ) -> Self {
        Self {
            post_id: Uuid::new_v4(),
            user_id,
            post_type,
            content,
            category,
            embedding,
            is_visible: true,
            // page cursors and timestamptz both stop at microseconds
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Trim and check post content, returning the text to store.
pub fn validate_content(raw: &str) -> Result<String, DomainError> {
    let content = raw.trim();

    if content.is_empty() {
        return Err(DomainError::Validation("Content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::Validation(format!(
            "Content too long (max {} characters)",
            MAX_CONTENT_CHARS
        )));
    }

    Ok(content.to_string())
}
