//! In-memory post store - used when no DATABASE_URL is configured.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::SubsecRound;
use tokio::sync::RwLock;
use uuid::Uuid;

use voice_core::domain::{PageCursor, Post, PostType};
use voice_core::error::RepoError;
use voice_core::ports::{BaseRepository, PostRepository, ScanFilter, SortDirection};

/// Post store backed by a HashMap behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn newest_first(a: &Post, b: &Post) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.post_id.cmp(&a.post_id))
    }

    fn is_after(post: &Post, cursor: &PageCursor, direction: SortDirection) -> bool {
        let key = (post.created_at, post.post_id);
        let mark = (cursor.created_at, cursor.post_id);
        match direction {
            SortDirection::NewestFirst => key < mark,
            SortDirection::OldestFirst => key > mark,
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn put(&self, mut entity: Post) -> Result<Post, RepoError> {
        // same precision as timestamptz, so page cursors round-trip exactly
        entity.created_at = entity.created_at.trunc_subsecs(6);

        let mut store = self.store.write().await;
        if store.contains_key(&entity.post_id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.insert(entity.post_id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn query_by_type(
        &self,
        post_type: PostType,
        direction: SortDirection,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| p.post_type == post_type)
            .filter(|p| after.is_none_or(|c| Self::is_after(p, &c, direction)))
            .cloned()
            .collect();

        posts.sort_by(Self::newest_first);
        if direction == SortDirection::OldestFirst {
            posts.reverse();
        }
        posts.truncate(limit);

        Ok(posts)
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        let mut posts: Vec<Post> = store
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(Self::newest_first);

        Ok(posts)
    }

    async fn scan_visible(&self, filter: &ScanFilter) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;

        Ok(store
            .values()
            .filter(|p| p.is_visible)
            .filter(|p| filter.post_type.is_none_or(|t| p.post_type == t))
            .filter(|p| filter.category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }
}
