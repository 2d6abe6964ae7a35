//! Post function: list, create, similar, search, own posts, delete.

use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use uuid::Uuid;

use voice_core::DomainError;
use voice_core::domain::{Category, PageCursor, PostType};
use voice_core::services::{
    DEFAULT_PAGE_SIZE, DEFAULT_SIMILAR_LIMIT, ListQuery, SearchQuery, SortOrder,
};
use voice_shared::Envelope;
use voice_shared::dto::{
    CreatePostRequest, ListPostsParams, MessageResponse, PostPageResponse, PostsResponse,
    SearchParams, SimilarParams,
};

use super::routing::PostRoute;
use super::{json_body, post_type_or_default, reply};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Any method on /posts/**
pub async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let route = PostRoute::resolve(req.method(), req.path());
    tracing::debug!(?route, path = %req.path(), "Dispatching posts request");

    let envelope = match route {
        PostRoute::List => list_posts(&req, &state).await?,
        PostRoute::Similar { post_id } => similar_posts(&req, &state, post_id.as_deref()).await?,
        PostRoute::Search => search_posts(&req, &state).await?,
        PostRoute::Mine => my_posts(&req, &state).await?,
        PostRoute::Create => create_post(&req, &state, &body).await?,
        PostRoute::Delete { post_id } => delete_post(&req, &state, post_id.as_deref()).await?,
        PostRoute::MethodNotAllowed => return Err(AppError::MethodNotAllowed),
    };

    Ok(reply(envelope))
}

fn query<T: serde::de::DeserializeOwned>(req: &HttpRequest) -> AppResult<T> {
    web::Query::<T>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| AppError::BadRequest(format!("Invalid query parameters: {}", e)))
}

fn parse_post_id(raw: Option<&str>) -> AppResult<Uuid> {
    let raw = raw.ok_or_else(|| AppError::BadRequest("Post id is required".to_string()))?;
    // an id that cannot exist is reported like a missing post
    Uuid::parse_str(raw).map_err(|_| DomainError::post_not_found(raw).into())
}

/// GET /posts?type=&sort=&limit=&nextToken=
async fn list_posts(req: &HttpRequest, state: &AppState) -> AppResult<Envelope> {
    let params: ListPostsParams = query(req)?;

    let sort = match params.sort.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => s.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };
    let cursor = params
        .next_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(PageCursor::decode)
        .transpose()?;

    let page = state
        .posts
        .list_posts(ListQuery {
            post_type: post_type_or_default(params.post_type.as_deref())?,
            sort,
            limit: params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            cursor,
        })
        .await?;

    Ok(Envelope::ok(&PostPageResponse {
        posts: page.posts,
        next_token: page.next_token,
    }))
}

/// GET /posts/{id}/similar?limit=
async fn similar_posts(
    req: &HttpRequest,
    state: &AppState,
    post_id: Option<&str>,
) -> AppResult<Envelope> {
    let post_id = parse_post_id(post_id)?;
    let params: SimilarParams = query(req)?;

    let posts = state
        .posts
        .get_similar(post_id, params.limit.unwrap_or(DEFAULT_SIMILAR_LIMIT))
        .await?;

    Ok(Envelope::ok(&PostsResponse { posts }))
}

/// GET /posts/search?q=&type=&category=
async fn search_posts(req: &HttpRequest, state: &AppState) -> AppResult<Envelope> {
    let params: SearchParams = query(req)?;

    let post_type = params
        .post_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<PostType>)
        .transpose()?;
    let category = params
        .category
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(str::parse::<Category>)
        .transpose()?;

    let posts = state
        .posts
        .search_posts(SearchQuery {
            text: params.q,
            post_type,
            category,
        })
        .await?;

    Ok(Envelope::ok(&PostsResponse { posts }))
}

/// GET /posts/me
async fn my_posts(req: &HttpRequest, state: &AppState) -> AppResult<Envelope> {
    let Identity(caller) = Identity::extract(req).await?;

    let posts = state.posts.get_my_posts(&caller).await?;
    Ok(Envelope::ok(&PostsResponse { posts }))
}

/// POST /posts  {"content": "...", "type": "good_thing"}
async fn create_post(req: &HttpRequest, state: &AppState, body: &[u8]) -> AppResult<Envelope> {
    let Identity(caller) = Identity::extract(req).await?;
    let request: CreatePostRequest = json_body(body)?;
    let post_type = post_type_or_default(request.post_type.as_deref())?;

    let post = state
        .posts
        .create_post(&caller, post_type, &request.content)
        .await?;

    Ok(Envelope::created(&post))
}

/// DELETE /posts/{id}
async fn delete_post(
    req: &HttpRequest,
    state: &AppState,
    post_id: Option<&str>,
) -> AppResult<Envelope> {
    let Identity(caller) = Identity::extract(req).await?;
    let post_id = parse_post_id(post_id)?;

    state.posts.delete_post(post_id, &caller).await?;

    Ok(Envelope::ok(&MessageResponse {
        message: "Post deleted".to_string(),
    }))
}
