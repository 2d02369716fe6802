use std::sync::Arc;

use api_adapters::{router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use domains::{Game, Post, Seed, SystemClock, User};
use services::ForumService;
use storage_adapters::MemoryStore;
use tower::ServiceExt;

const FORM: &str = "application/x-www-form-urlencoded";

fn seed() -> Seed {
    Seed {
        games: Some(vec![
            Game { id: 1, title: "Chess".into() },
            Game { id: 2, title: "Go".into() },
        ]),
        tags: vec!["chat".into(), "strategy".into(), "c++".into()],
        users: vec![User {
            id: 7,
            username: "alice".into(),
            password: "pw1".into(),
        }],
        posts: vec![Post {
            id: 100,
            user_id: 7,
            game_id: 2,
            title: "Opening theory".into(),
            content: "Which joseki?".into(),
            tags: vec!["strategy".into()],
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }],
        comments: vec![],
    }
}

async fn app() -> Router {
    let forum = ForumService::open(Arc::new(MemoryStore::new()), Arc::new(SystemClock), &seed())
        .await
        .unwrap();
    router(AppState::new(forum), "static")
}

fn form(method: Method, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_root_redirects_to_homepage() {
    let app = app().await;
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/homepage");
}

#[tokio::test]
async fn test_create_post_then_homepage_lists_it() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(form(
            Method::POST,
            "/posts",
            "title=Hi&postbody=Hello+world&game=1&tags=chat",
            Some("gamehub_user=7"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/homepage");

    let response = app.oneshot(get("/homepage")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    let hi = html.find("post-title\">Hi<").unwrap();
    assert!(html.contains("Chess"));
    assert!(html.contains("alice"));
    assert!(html.contains("Opening theory"));
    // Newest first.
    assert!(hi < html.find("Opening theory").unwrap());
}

#[tokio::test]
async fn test_anonymous_post_shows_unknown_user() {
    let app = app().await;
    app.clone()
        .oneshot(form(Method::POST, "/posts", "title=Anon&postbody=x&game=1", None))
        .await
        .unwrap();

    let html = body_text(app.oneshot(get("/homepage")).await.unwrap()).await;
    assert!(html.contains("unknown user"));
}

#[tokio::test]
async fn test_homepage_filters_by_tag() {
    let app = app().await;
    app.clone()
        .oneshot(form(
            Method::POST,
            "/posts",
            "title=Banter&postbody=hey&game=1&tags=chat",
            None,
        ))
        .await
        .unwrap();

    let html = body_text(app.oneshot(get("/homepage?tag=strategy")).await.unwrap()).await;
    assert!(html.contains("Opening theory"));
    assert!(!html.contains("Banter"));
}

#[tokio::test]
async fn test_tag_filter_with_reserved_characters() {
    let app = app().await;
    app.clone()
        .oneshot(form(
            Method::POST,
            "/posts",
            "title=Templates&postbody=SFINAE&game=1&tags=c%2B%2B",
            None,
        ))
        .await
        .unwrap();

    let html = body_text(app.clone().oneshot(get("/homepage")).await.unwrap()).await;
    // The browser form-encodes the button value when submitting the filter.
    assert!(html.contains(r#"name="tag" value="c++""#));

    let html = body_text(app.oneshot(get("/homepage?tag=c%2B%2B")).await.unwrap()).await;
    assert!(html.contains("Templates"));
    assert!(!html.contains("Opening theory"));
    assert!(html.contains(r#"class="filter-tag active" name="tag" value="c++""#));
}

#[tokio::test]
async fn test_missing_body_is_a_bad_request() {
    let app = app().await;
    let response = app
        .oneshot(form(Method::POST, "/posts", "title=Hi&game=1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("post body is required"));
}

#[tokio::test]
async fn test_unknown_post_is_not_found() {
    let app = app().await;
    for uri in ["/posts/999", "/posts/999/edit"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_edit_form_is_prefilled() {
    let app = app().await;
    let response = app.oneshot(get("/posts/100/edit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Opening theory"));
    assert!(html.contains("Which joseki?"));
}

#[tokio::test]
async fn test_update_post_replaces_fields() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(form(
            Method::PUT,
            "/posts/100",
            "title=Endgames&postbody=Ko+fights&game=1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = body_text(app.oneshot(get("/posts/100")).await.unwrap()).await;
    assert!(html.contains("Endgames"));
    assert!(html.contains("Ko fights"));
    assert!(html.contains("Chess"));
    assert!(!html.contains("Opening theory"));
}

#[tokio::test]
async fn test_rejected_update_renders_reason() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(form(Method::PUT, "/posts/100", "title=Empty&game=1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::LOCATION).is_none());
    assert!(body_text(response).await.contains("post body is required"));

    let html = body_text(app.oneshot(get("/posts/100")).await.unwrap()).await;
    assert!(html.contains("Opening theory"));
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let app = app().await;
    let response = app
        .oneshot(form(Method::PUT, "/posts/5", "postbody=x&game=1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_post_removes_it() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/posts/100")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/posts/100")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comment_appears_on_post_page() {
    let app = app().await;
    let response = app
        .clone()
        .oneshot(form(
            Method::POST,
            "/posts/100/comments",
            "content=Nice",
            Some("gamehub_user=7"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/posts/100");

    let html = body_text(app.oneshot(get("/posts/100")).await.unwrap()).await;
    assert!(html.contains("Nice"));
    assert!(html.contains("Comments (1)"));
}

#[tokio::test]
async fn test_comment_on_unknown_post_is_not_found() {
    let app = app().await;
    let response = app
        .oneshot(form(Method::POST, "/posts/1/comments", "content=Nice", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_metrics_count_created_posts() {
    let app = app().await;
    app.clone()
        .oneshot(form(Method::POST, "/posts", "postbody=x&game=1", None))
        .await
        .unwrap();

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("gamehub_posts_created_total 1"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app().await;
    let response = app.oneshot(get("/homepage")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
