//! Post lifecycle: create, list, similar, search, mine, delete.

use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use super::ai_gateway::AiGateway;
use super::ranking::{FeedRanker, RecencyRanker, ShuffleFeedRanker, SimilarityRanker};
use crate::domain::{Caller, Category, PageCursor, Post, PostType, validate_content};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository, ScanFilter, SortDirection};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Feed ordering requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    /// Placeholder: a shuffle of the newest page, see [`ShuffleFeedRanker`].
    Recommended,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "recommended" => Ok(SortOrder::Recommended),
            other => Err(DomainError::Validation(format!("Unknown sort order: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListQuery {
    pub post_type: PostType,
    pub sort: SortOrder,
    pub limit: usize,
    pub cursor: Option<PageCursor>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            post_type: PostType::default(),
            sort: SortOrder::default(),
            limit: DEFAULT_PAGE_SIZE,
            cursor: None,
        }
    }
}

/// One page of a listing. `next_token` is set when the page came back full.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub post_type: Option<PostType>,
    pub category: Option<Category>,
}

/// Orchestrates the post lifecycle over the store and the AI gateway.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    ai: Arc<AiGateway>,
    similarity: Arc<dyn SimilarityRanker>,
    feed: Arc<dyn FeedRanker>,
}

impl PostService {
    /// Service with the placeholder rankers.
    pub fn new(repo: Arc<dyn PostRepository>, ai: Arc<AiGateway>) -> Self {
        Self {
            similarity: Arc::new(RecencyRanker::new(repo.clone())),
            feed: Arc::new(ShuffleFeedRanker),
            repo,
            ai,
        }
    }

    pub fn with_similarity_ranker(mut self, ranker: Arc<dyn SimilarityRanker>) -> Self {
        self.similarity = ranker;
        self
    }

    pub fn with_feed_ranker(mut self, ranker: Arc<dyn FeedRanker>) -> Self {
        self.feed = ranker;
        self
    }

    /// Validate → moderate → classify → embed → persist.
    ///
    /// Only validation and moderation can reject. Classification and
    /// embedding degrade to `other` and an empty vector.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id, post_type = %post_type))]
    pub async fn create_post(
        &self,
        caller: &Caller,
        post_type: PostType,
        raw_content: &str,
    ) -> Result<Post, DomainError> {
        let content = validate_content(raw_content)?;

        let verdict = self.ai.moderate(&content).await;
        if verdict.is_inappropriate {
            return Err(DomainError::Rejected(
                "Inappropriate content detected".to_string(),
            ));
        }

        let classification = self.ai.classify(&content, post_type).await;
        let embedding = self.ai.embed(&content).await;

        let post = Post::new(
            caller.user_id.clone(),
            post_type,
            content,
            classification.category,
            embedding,
        );
        let saved = self.repo.put(post).await?;

        tracing::info!(
            post_id = %saved.post_id,
            category = %saved.category,
            embedding_dims = saved.embedding.len(),
            "Post created"
        );
        Ok(saved)
    }

    pub async fn list_posts(&self, query: ListQuery) -> Result<PostPage, DomainError> {
        let limit = query.limit.clamp(1, MAX_PAGE_SIZE);
        let direction = match query.sort {
            SortOrder::Oldest => SortDirection::OldestFirst,
            SortOrder::Newest | SortOrder::Recommended => SortDirection::NewestFirst,
        };

        let posts = self
            .repo
            .query_by_type(query.post_type, direction, limit, query.cursor)
            .await?;

        let next_token = if posts.len() == limit {
            posts.last().map(|p| PageCursor::after(p).encode())
        } else {
            None
        };

        let posts = match query.sort {
            SortOrder::Recommended => self.feed.rank(posts),
            _ => posts,
        };

        Ok(PostPage { posts, next_token })
    }

    /// Posts related to `post_id`, excluding it.
    pub async fn get_similar(&self, post_id: Uuid, limit: usize) -> Result<Vec<Post>, DomainError> {
        let source = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id.to_string()))?;

        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        Ok(self.similarity.similar_to(&source, limit).await?)
    }

    /// Visible posts matching the filters whose content contains `text`,
    /// case-insensitively. Newest first, at most [`MAX_SEARCH_RESULTS`].
    pub async fn search_posts(&self, query: SearchQuery) -> Result<Vec<Post>, DomainError> {
        let filter = ScanFilter {
            post_type: query.post_type,
            category: query.category,
        };
        let needle = query
            .text
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase());

        let mut posts: Vec<Post> = self
            .repo
            .scan_visible(&filter)
            .await?
            .into_iter()
            .filter(|p| p.is_visible)
            .filter(|p| match &needle {
                Some(needle) => p.content.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(MAX_SEARCH_RESULTS);
        Ok(posts)
    }

    pub async fn get_my_posts(&self, caller: &Caller) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.query_by_user(&caller.user_id).await?)
    }

    /// Delete a post. Only its author may do so.
    #[tracing::instrument(skip_all, fields(user_id = %caller.user_id, post_id = %post_id))]
    pub async fn delete_post(&self, post_id: Uuid, caller: &Caller) -> Result<(), DomainError> {
        let post = self
            .repo
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id.to_string()))?;

        if !post.is_owned_by(&caller.user_id) {
            tracing::warn!(owner = %post.user_id, "Delete attempted by non-owner");
            return Err(DomainError::Forbidden);
        }

        match self.repo.delete(post_id).await {
            Ok(()) => {
                tracing::info!("Post deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::post_not_found(post_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
