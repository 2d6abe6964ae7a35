//! Method + path dispatch for the two functions.
//!
//! Matching is by path substring, the way the API gateway forwards proxied
//! paths: `/posts/{id}/similar`, `/posts/search`, `/ai/classify` and so on.

use actix_web::http::Method;

/// Operation selected for a request under `/posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostRoute {
    List,
    Similar { post_id: Option<String> },
    Search,
    Mine,
    Create,
    Delete { post_id: Option<String> },
    MethodNotAllowed,
}

impl PostRoute {
    pub fn resolve(method: &Method, path: &str) -> Self {
        match *method {
            Method::GET if path.contains("/similar") => PostRoute::Similar {
                post_id: post_id_segment(path),
            },
            Method::GET if path.contains("/search") => PostRoute::Search,
            Method::GET if path.contains("/me") => PostRoute::Mine,
            Method::GET => PostRoute::List,
            Method::POST => PostRoute::Create,
            Method::DELETE => PostRoute::Delete {
                post_id: post_id_segment(path),
            },
            _ => PostRoute::MethodNotAllowed,
        }
    }
}

/// Operation selected for a request under `/ai`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiRoute {
    Classify,
    Moderate,
    Embedding,
    Sentiment,
    NotFound,
    MethodNotAllowed,
}

impl AiRoute {
    pub fn resolve(method: &Method, path: &str) -> Self {
        let route = if path.contains("/classify") {
            AiRoute::Classify
        } else if path.contains("/moderate") {
            AiRoute::Moderate
        } else if path.contains("/embedding") {
            AiRoute::Embedding
        } else if path.contains("/sentiment") {
            AiRoute::Sentiment
        } else {
            return AiRoute::NotFound;
        };

        if *method == Method::POST {
            route
        } else {
            AiRoute::MethodNotAllowed
        }
    }
}

/// The segment following `posts` in the path, if any.
fn post_id_segment(path: &str) -> Option<String> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    segments.find(|s| *s == "posts")?;
    segments.next().map(str::to_string)
}
