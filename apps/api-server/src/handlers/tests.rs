use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use voice_core::AiGateway;
use voice_core::error::AiError;
use voice_core::ports::TextGenerator;
use voice_infra::{InMemoryPostRepository, JwtClaimsReader, UnconfiguredAi};

use super::configure_routes;
use crate::observability::RequestIdMiddleware;
use crate::state::AppState;

/// Answers every prompt with the same text.
struct CannedGenerator(&'static str);

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, AiError> {
        Ok(self.0.to_string())
    }
}

fn unconfigured_state() -> AppState {
    let ai = Arc::new(UnconfiguredAi);
    AppState::from_parts(
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(AiGateway::new(ai.clone(), ai.clone(), ai)),
        Arc::new(JwtClaimsReader::new()),
    )
}

fn state_with_model(reply: &'static str) -> AppState {
    let ai = Arc::new(UnconfiguredAi);
    AppState::from_parts(
        Arc::new(InMemoryPostRepository::new()),
        Arc::new(AiGateway::new(
            Arc::new(CannedGenerator(reply)),
            ai.clone(),
            ai,
        )),
        Arc::new(JwtClaimsReader::new()),
    )
}

fn bearer(user_id: &str) -> (&'static str, String) {
    let token = encode(
        &Header::default(),
        &json!({ "sub": user_id }),
        &EncodingKey::from_secret(b"gateway-secret"),
    )
    .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! create {
    ($app:expr, $user:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/posts")
            .insert_header(bearer($user))
            .set_json($body)
            .to_request();
        let post: Value = test::call_and_read_body_json(&$app, req).await;
        post
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("Access-Control-Allow-Origin").unwrap(), "*");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = test::init_service(
        App::new()
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(unconfigured_state()))
            .configure(configure_routes),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-123");

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[actix_web::test]
async fn test_create_post_degrades_without_ai() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(bearer("u1"))
        .set_json(json!({ "content": "  今日は公園で桜を見た  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["userId"], "u1");
    assert_eq!(post["type"], "good_thing");
    assert_eq!(post["content"], "今日は公園で桜を見た");
    assert_eq!(post["category"], "other");
    assert_eq!(post["embedding"], json!([]));
    assert_eq!(post["isVisible"], true);
    assert!(post["postId"].is_string());
    assert!(post["createdAt"].is_string());
}

#[actix_web::test]
async fn test_create_post_requires_identity() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_post_validation() {
    let app = app!(unconfigured_state());

    let cases = [
        (json!({ "content": "   " }), "Content is required"),
        (
            json!({ "content": "あ".repeat(301) }),
            "Content too long (max 300 characters)",
        ),
        (
            json!({ "content": "hi", "type": "bad_thing" }),
            "Unknown post type: bad_thing",
        ),
    ];

    for (body, message) in cases {
        let req = test::TestRequest::post()
            .uri("/posts")
            .insert_header(bearer("u1"))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], message);
    }

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(bearer("u1"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // nothing was persisted
    let req = test::TestRequest::get().uri("/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["posts"], json!([]));
}

#[actix_web::test]
async fn test_create_post_rejected_by_moderation() {
    let app = app!(state_with_model(
        r#"{"isInappropriate": true, "reason": "誹謗中傷", "confidence": 0.9}"#
    ));

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header(bearer("u1"))
        .set_json(json!({ "content": "ひどい言葉" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Inappropriate content detected");
}

#[actix_web::test]
async fn test_list_posts_paginates() {
    let app = app!(unconfigured_state());
    for i in 0..3 {
        create!(app, "u1", json!({ "content": format!("post {}", i) }));
    }
    create!(app, "u1", json!({ "content": "ideal", "type": "ideal_world" }));

    let req = test::TestRequest::get().uri("/posts?limit=2").to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first["posts"].as_array().unwrap().len(), 2);
    assert_eq!(first["posts"][0]["content"], "post 2");
    let token = first["nextToken"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/posts?limit=2&nextToken={}", token))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["posts"].as_array().unwrap().len(), 1);
    assert_eq!(second["posts"][0]["content"], "post 0");
    assert_eq!(second["nextToken"], Value::Null);

    let req = test::TestRequest::get()
        .uri("/posts?type=ideal_world&sort=oldest")
        .to_request();
    let ideal: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ideal["posts"].as_array().unwrap().len(), 1);
    assert_eq!(ideal["posts"][0]["type"], "ideal_world");
}

#[actix_web::test]
async fn test_list_posts_rejects_bad_parameters() {
    let app = app!(unconfigured_state());

    for uri in [
        "/posts?sort=popular",
        "/posts?nextToken=%%%",
        "/posts?limit=many",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_web::test]
async fn test_similar_search_and_mine() {
    let app = app!(unconfigured_state());
    let source = create!(app, "u1", json!({ "content": "Sunny day at the park" }));
    create!(app, "u2", json!({ "content": "Rainy DAY indoors" }));
    create!(app, "u2", json!({ "content": "Great dinner" }));

    let source_id = source["postId"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/similar", source_id))
        .to_request();
    let similar: Value = test::call_and_read_body_json(&app, req).await;
    let similar = similar["posts"].as_array().unwrap();
    assert_eq!(similar.len(), 2);
    assert!(similar.iter().all(|p| p["postId"] != source_id));

    let req = test::TestRequest::get()
        .uri("/posts/search?q=day")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found["posts"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/posts/me")
        .insert_header(bearer("u2"))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    let mine = mine["posts"].as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p["userId"] == "u2"));

    let req = test::TestRequest::get().uri("/posts/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_similar_unknown_post() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/similar", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Post not found");
}

#[actix_web::test]
async fn test_delete_post_ownership() {
    let app = app!(unconfigured_state());
    let post = create!(app, "owner", json!({ "content": "mine" }));
    let uri = format!("/posts/{}", post["postId"].as_str().unwrap());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("intruder"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Not authorized");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("owner"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Post deleted");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer("owner"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_post_bad_ids() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::delete()
        .uri("/posts/not-a-uuid")
        .insert_header(bearer("u1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/posts")
        .insert_header(bearer("u1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_unsupported_post_method() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::put().uri("/posts/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Method not allowed");
}

#[actix_web::test]
async fn test_ai_endpoints_fail_open_without_provider() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::post()
        .uri("/ai/classify")
        .set_json(json!({ "content": "友達と遊んだ", "type": "good_thing" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "category": "other", "confidence": 0.0 }));

    let req = test::TestRequest::post()
        .uri("/ai/moderate")
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["isInappropriate"], false);

    let req = test::TestRequest::post()
        .uri("/ai/embedding")
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "embedding": [] }));

    let req = test::TestRequest::post()
        .uri("/ai/sentiment")
        .set_json(json!({ "content": "hello" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "AI provider is not configured");
}

#[actix_web::test]
async fn test_ai_classify_with_model() {
    let app = app!(state_with_model(
        "分類結果です: {\"category\": \"Food\", \"confidence\": 0.92}"
    ));

    let req = test::TestRequest::post()
        .uri("/ai/classify")
        .set_json(json!({ "content": "美味しいラーメンを食べた" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["category"], "food");
    assert_eq!(body["confidence"], 0.92);
}

#[actix_web::test]
async fn test_ai_routing_errors() {
    let app = app!(unconfigured_state());

    let req = test::TestRequest::post()
        .uri("/ai/translate")
        .set_json(json!({ "content": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/ai/classify").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
