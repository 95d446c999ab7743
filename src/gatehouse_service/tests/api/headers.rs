use serde_json::json;

use crate::helpers::{ALLOWED_ORIGIN, BODY_LIMIT, TestApp, error_code};

#[tokio::test]
async fn security_headers_are_set() {
    let app = TestApp::new().await;

    let response = app.post_forgot(&json!({ "email": "ghost@x.com" })).await;

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_assets() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(app.url("/no-such-page"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(response.headers()["x-content-type-options"], "nosniff");
}

#[tokio::test]
async fn responses_are_gzipped_on_request() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(app.url("/register"))
        .header("accept-encoding", "gzip")
        .json(&json!({ "name": "A", "email": "a@x.com", "password": "12345" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.headers()["content-encoding"], "gzip");
}

#[tokio::test]
async fn cors_allows_only_configured_origins() {
    let app = TestApp::new().await;
    let preflight = |origin: &'static str| {
        app.http_client
            .request(reqwest::Method::OPTIONS, app.url("/login"))
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .send()
    };

    let allowed = preflight(ALLOWED_ORIGIN).await.unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );

    let denied = preflight("http://evil.example").await.unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = TestApp::new().await;
    let name = "x".repeat(BODY_LIMIT + 1);

    let response = app
        .post_register(&json!({ "name": name, "email": "a@x.com", "password": "12345" }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(error_code(response).await, "BODY_TOO_LARGE");
    // Only the seeded admin.
    assert_eq!(app.store.len().await, 1);
}
