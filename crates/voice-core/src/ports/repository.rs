use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, PageCursor, Post, PostType};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    ///
    /// Ids are generated fresh for every entity, so this is a create, not an
    /// upsert: every implementation rejects an id that is already stored
    /// with [`RepoError::Constraint`] and leaves the stored entity untouched.
    async fn put(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Ordering on `created_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    NewestFirst,
    OldestFirst,
}

/// Predicate for the visible-post scan. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    pub post_type: Option<PostType>,
    pub category: Option<Category>,
}

/// Post table with secondary indexes on (type, created_at) and (user_id, created_at).
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Index query on (type, created_at), resuming strictly after `after` when given.
    async fn query_by_type(
        &self,
        post_type: PostType,
        direction: SortDirection,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<Post>, RepoError>;

    /// All posts by one author, newest first.
    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Post>, RepoError>;

    /// Full-table scan of visible posts matching `filter`.
    ///
    /// Not index-backed: linear in table size.
    async fn scan_visible(&self, filter: &ScanFilter) -> Result<Vec<Post>, RepoError>;
}
