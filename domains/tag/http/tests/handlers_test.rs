use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
    routing::Router,
};
use tag_http::{TAG_SCRIPT, TagHandlers};
use tower::ServiceExt;

fn setup_test_app() -> Router { TagHandlers::routes() }

async fn fetch_script(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn test_get_tag_script_headers() {
    let (status, headers, body) = fetch_script(setup_test_app(), "/tag-script").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/javascript");
    assert_eq!(headers[header::CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(body, TAG_SCRIPT.as_bytes());
}

#[tokio::test]
async fn test_tag_script_ignores_id() {
    let (_, _, plain) = fetch_script(setup_test_app(), "/tag-script").await;
    let (status, _, with_id) =
        fetch_script(setup_test_app(), "/tag-script?id=SITE-42").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, with_id);
}

#[tokio::test]
async fn test_tag_script_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/tag-script")
        .body(Body::empty())
        .unwrap();
    let response = setup_test_app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.is_empty());
}
