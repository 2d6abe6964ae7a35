//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use voice_core::domain::Post;
use voice_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,
    pub user_id: String,
    pub post_type: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub embedding: Json,
    pub is_visible: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
///
/// Fails when a row holds a type, category or embedding this build does not
/// understand.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, detail: String| {
            RepoError::Query(format!(
                "Corrupt {} in post {}: {}",
                field, model.post_id, detail
            ))
        };

        let post_type = model
            .post_type
            .parse()
            .map_err(|e: voice_core::DomainError| corrupt("type", e.to_string()))?;
        let category = model
            .category
            .parse()
            .map_err(|e: voice_core::DomainError| corrupt("category", e.to_string()))?;
        let embedding = serde_json::from_value(model.embedding.clone())
            .map_err(|e| corrupt("embedding", e.to_string()))?;

        Ok(Self {
            post_id: model.post_id,
            user_id: model.user_id,
            post_type,
            content: model.content,
            category,
            embedding,
            is_visible: model.is_visible,
            created_at: model.created_at.into(),
        })
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<Post> for ActiveModel {
    fn from(post: Post) -> Self {
        Self {
            post_id: Set(post.post_id),
            user_id: Set(post.user_id),
            post_type: Set(post.post_type.as_str().to_string()),
            content: Set(post.content),
            category: Set(post.category.as_str().to_string()),
            embedding: Set(Json::from(post.embedding)),
            is_visible: Set(post.is_visible),
            created_at: Set(post.created_at.into()),
        }
    }
}
