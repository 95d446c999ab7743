use serde_json::{Value, json};

use crate::helpers::{TestApp, error_code};

#[tokio::test]
async fn register_returns_201_with_token_and_unverified_user() {
    let app = TestApp::new().await;

    let response = app
        .post_register(&json!({ "name": "A", "email": "a@x.com", "password": "12345" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let user = &body["user"];
    assert_eq!(user["name"], "A");
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["role"], "user");
    assert_eq!(user["verified"], false);
    assert!(user["_id"].is_string());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    let sent = app.email_client.last_sent_to("a@x.com").await.unwrap();
    assert_eq!(sent.token(), user["verification"].as_str());
}

#[tokio::test]
async fn register_keeps_verification_token_out_of_band_by_default() {
    let app = TestApp::spawn(false).await;

    let response = app
        .post_register(&json!({ "name": "A", "email": "a@x.com", "password": "12345" }))
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "a@x.com");
    assert!(body["user"].get("verification").is_none());
    assert!(app.email_client.last_sent_to("a@x.com").await.is_some());
}

#[tokio::test]
async fn register_trims_surrounding_whitespace() {
    let app = TestApp::new().await;

    let body = app.register("  A  ", "  a@x.com ").await;

    assert_eq!(body["user"]["name"], "A");
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let app = TestApp::new().await;
    app.register("A", "a@x.com").await;

    let response = app
        .post_register(&json!({ "name": "B", "email": "a@x.com", "password": "67890" }))
        .await;

    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(error_code(response).await, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn concurrent_registrations_create_one_account() {
    let app = TestApp::new().await;
    let before = app.store.len().await;

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let client = app.http_client.clone();
            let url = app.url("/register");
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&json!({ "name": "A", "email": "race@x.com", "password": "12345" }))
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for attempt in attempts {
        statuses.push(attempt.await.unwrap());
    }

    assert_eq!(statuses.iter().filter(|s| **s == 201).count(), 1);
    assert!(statuses.iter().all(|s| *s == 201 || *s == 422));
    assert_eq!(app.store.len().await, before + 1);
}

#[tokio::test]
async fn register_reports_invalid_fields() {
    let app = TestApp::new().await;

    let cases = [
        (json!({ "email": "a@x.com", "password": "12345" }), "MISSING", "name"),
        (json!({ "name": "A", "email": "nope", "password": "12345" }), "EMAIL_IS_NOT_VALID", "email"),
        (json!({ "name": "A", "email": "a@x.com", "password": "1234" }), "PASSWORD_TOO_SHORT_MIN_5", "password"),
        (json!({ "name": "", "email": "a@x.com", "password": "12345" }), "IS_EMPTY", "name"),
    ];

    for (body, code, param) in cases {
        let response = app.post_register(&body).await;
        assert_eq!(response.status().as_u16(), 422, "{body}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errors"]["msg"], code);
        assert_eq!(body["errors"]["param"], param);
    }
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(app.url("/register"))
        .header("content-type", "application/json")
        .body("{\"name\":")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(error_code(response).await, "MALFORMED_BODY");
}
