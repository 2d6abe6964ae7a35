//! Application services - the orchestration layer above the ports.

mod ai_gateway;
mod fallback;
mod json_extract;
mod post_service;
mod ranking;

#[cfg(test)]
mod testing;

pub use ai_gateway::{AiGateway, NEGATIVE_OVERRIDE_THRESHOLD};
pub use fallback::or_fallback;
pub use json_extract::{extract_json, extract_json_object};
pub use post_service::{
    DEFAULT_PAGE_SIZE, DEFAULT_SIMILAR_LIMIT, ListQuery, MAX_PAGE_SIZE, MAX_SEARCH_RESULTS,
    PostPage, PostService, SearchQuery, SortOrder,
};
pub use ranking::{FeedRanker, RecencyRanker, ShuffleFeedRanker, SimilarityRanker};
