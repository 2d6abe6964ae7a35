//! Ranking strategies for "similar posts" and the recommended feed.
//!
//! Both shipped implementations are placeholders: neither looks at content
//! or embeddings.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Post;
use crate::error::RepoError;
use crate::ports::{PostRepository, SortDirection};

/// Finds posts related to a source post.
///
/// Implementations must never include `source` itself in the result.
/// A vector-index implementation (approximate nearest neighbour over
/// `Post::embedding`) is the intended replacement for [`RecencyRanker`].
#[async_trait]
pub trait SimilarityRanker: Send + Sync {
    async fn similar_to(&self, source: &Post, limit: usize) -> Result<Vec<Post>, RepoError>;
}

/// Recency stand-in for similarity: the newest other posts of the same type.
///
/// The source embedding is ignored.
pub struct RecencyRanker {
    repo: Arc<dyn PostRepository>,
}

impl RecencyRanker {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl SimilarityRanker for RecencyRanker {
    async fn similar_to(&self, source: &Post, limit: usize) -> Result<Vec<Post>, RepoError> {
        // one extra in case the source itself is among the newest
        let candidates = self
            .repo
            .query_by_type(source.post_type, SortDirection::NewestFirst, limit + 1, None)
            .await?;

        Ok(candidates
            .into_iter()
            .filter(|p| p.post_id != source.post_id)
            .take(limit)
            .collect())
    }
}

/// Reorders a page of newest-first posts for the "recommended" feed.
pub trait FeedRanker: Send + Sync {
    fn rank(&self, posts: Vec<Post>) -> Vec<Post>;
}

/// Stand-in for a recommendation model: a uniform random permutation.
pub struct ShuffleFeedRanker;

impl FeedRanker for ShuffleFeedRanker {
    fn rank(&self, mut posts: Vec<Post>) -> Vec<Post> {
        fastrand::shuffle(&mut posts);
        posts
    }
}
