//! PostgreSQL post store.

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use voice_core::domain::{PageCursor, Post, PostType};
use voice_core::error::RepoError;
use voice_core::ports::{PostRepository, ScanFilter, SortDirection};

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

fn into_posts(models: Vec<post::Model>) -> Result<Vec<Post>, RepoError> {
    models.into_iter().map(Post::try_from).collect()
}

/// Rows strictly after `cursor` in the given direction, breaking
/// `created_at` ties on `post_id`.
fn after_cursor(cursor: PageCursor, direction: SortDirection) -> Condition {
    let at: DateTimeWithTimeZone = cursor.created_at.into();

    match direction {
        SortDirection::NewestFirst => Condition::any()
            .add(post::Column::CreatedAt.lt(at))
            .add(
                Condition::all()
                    .add(post::Column::CreatedAt.eq(at))
                    .add(post::Column::PostId.lt(cursor.post_id)),
            ),
        SortDirection::OldestFirst => Condition::any()
            .add(post::Column::CreatedAt.gt(at))
            .add(
                Condition::all()
                    .add(post::Column::CreatedAt.eq(at))
                    .add(post::Column::PostId.gt(cursor.post_id)),
            ),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn query_by_type(
        &self,
        post_type: PostType,
        direction: SortDirection,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(%post_type, ?direction, limit, "Querying posts by type");

        let mut query = PostEntity::find().filter(post::Column::PostType.eq(post_type.as_str()));
        if let Some(cursor) = after {
            query = query.filter(after_cursor(cursor, direction));
        }

        let query = match direction {
            SortDirection::NewestFirst => query
                .order_by_desc(post::Column::CreatedAt)
                .order_by_desc(post::Column::PostId),
            SortDirection::OldestFirst => query
                .order_by_asc(post::Column::CreatedAt)
                .order_by_asc(post::Column::PostId),
        };

        let models = query
            .limit(limit as u64)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        into_posts(models)
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Post>, RepoError> {
        let models = PostEntity::find()
            .filter(post::Column::UserId.eq(user_id))
            .order_by_desc(post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        into_posts(models)
    }

    async fn scan_visible(&self, filter: &ScanFilter) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(?filter, "Scanning visible posts");

        let mut query = PostEntity::find().filter(post::Column::IsVisible.eq(true));
        if let Some(post_type) = filter.post_type {
            query = query.filter(post::Column::PostType.eq(post_type.as_str()));
        }
        if let Some(category) = filter.category {
            query = query.filter(post::Column::Category.eq(category.as_str()));
        }

        let models = query.all(&self.db).await.map_err(query_error)?;
        into_posts(models)
    }
}
