//! In-crate fakes for the ports, shared by the service tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::AiGateway;
use crate::domain::{Category, PageCursor, Post, PostType, SentimentLabel, SentimentScores};
use crate::error::{AiError, RepoError};
use crate::ports::{
    BaseRepository, Embedder, PostRepository, ScanFilter, SentimentDetector, SortDirection,
    TextGenerator,
};

type Responder = Box<dyn Fn(&str) -> Result<String, AiError> + Send + Sync>;

/// Text generator answering through a closure and recording every prompt.
pub struct FnGenerator {
    respond: Responder,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl FnGenerator {
    pub fn new(respond: impl Fn(&str) -> Result<String, AiError> + Send + Sync + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn reply(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(AiError::Network("connection refused".to_string())))
    }

    /// Separate replies for the moderation and classification prompts.
    pub fn routed(moderation: &str, classification: &str) -> Self {
        let moderation = moderation.to_string();
        let classification = classification.to_string();
        Self::new(move |prompt| {
            if prompt.contains("不適切") {
                Ok(moderation.clone())
            } else {
                Ok(classification.clone())
            }
        })
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }
}

#[async_trait]
impl TextGenerator for FnGenerator {
    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)(prompt)
    }
}

pub struct FixedEmbedder(Option<Vec<f32>>);

impl FixedEmbedder {
    pub fn returning(vector: Vec<f32>) -> Self {
        Self(Some(vector))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, AiError> {
        self.0.clone().ok_or_else(|| AiError::Api {
            status: 503,
            body: "throttled".to_string(),
        })
    }
}

/// Sentiment detector returning a fixed negative score.
pub struct FixedSentiment(Option<f64>);

impl FixedSentiment {
    pub fn negative(score: f64) -> Self {
        Self(Some(score))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl SentimentDetector for FixedSentiment {
    async fn detect(&self, _text: &str) -> Result<SentimentScores, AiError> {
        let negative = self.0.ok_or(AiError::NotConfigured)?;
        Ok(SentimentScores {
            label: if negative > 0.5 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Positive
            },
            positive: 1.0 - negative,
            negative,
            neutral: 0.0,
            mixed: 0.0,
        })
    }
}

pub fn gateway(
    generator: FnGenerator,
    embedder: FixedEmbedder,
    sentiment: FixedSentiment,
) -> AiGateway {
    AiGateway::new(Arc::new(generator), Arc::new(embedder), Arc::new(sentiment))
}

/// A post created `minutes_ago` minutes before now.
pub fn post_at(user_id: &str, post_type: PostType, content: &str, minutes_ago: i64) -> Post {
    let category = Category::for_type(post_type)[0];
    let mut post = Post::new(
        user_id.to_string(),
        post_type,
        content.to_string(),
        category,
        vec![],
    );
    post.created_at = Utc::now() - Duration::minutes(minutes_ago);
    post
}

/// Vec-backed post table.
#[derive(Default)]
pub struct MemoryRepo {
    posts: Mutex<Vec<Post>>,
    puts: AtomicUsize,
}

impl MemoryRepo {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Mutex::new(posts),
            puts: AtomicUsize::new(0),
        }
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn sorted(mut posts: Vec<Post>, direction: SortDirection) -> Vec<Post> {
        posts.sort_by_key(|p| (p.created_at, p.post_id));
        if direction == SortDirection::NewestFirst {
            posts.reverse();
        }
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for MemoryRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.post_id == id).cloned())
    }

    async fn put(&self, post: Post) -> Result<Post, RepoError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.post_id != id);
        if posts.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for MemoryRepo {
    async fn query_by_type(
        &self,
        post_type: PostType,
        direction: SortDirection,
        limit: usize,
        after: Option<PageCursor>,
    ) -> Result<Vec<Post>, RepoError> {
        let matching: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.post_type == post_type)
            .cloned()
            .collect();

        Ok(Self::sorted(matching, direction)
            .into_iter()
            .filter(|p| match after {
                None => true,
                Some(c) => {
                    let key = (p.created_at, p.post_id);
                    let cursor = (c.created_at, c.post_id);
                    match direction {
                        SortDirection::NewestFirst => key < cursor,
                        SortDirection::OldestFirst => key > cursor,
                    }
                }
            })
            .take(limit)
            .collect())
    }

    async fn query_by_user(&self, user_id: &str) -> Result<Vec<Post>, RepoError> {
        let mine: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        Ok(Self::sorted(mine, SortDirection::NewestFirst))
    }

    async fn scan_visible(&self, filter: &ScanFilter) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_visible)
            .filter(|p| filter.post_type.is_none_or(|t| p.post_type == t))
            .filter(|p| filter.category.is_none_or(|c| p.category == c))
            .cloned()
            .collect())
    }
}
