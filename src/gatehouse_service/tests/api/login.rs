use serde_json::{Value, json};

use crate::helpers::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, error_code};

#[tokio::test]
async fn register_verify_login_flow() {
    let app = TestApp::new().await;
    let registered = app.register("A", "a@x.com").await;

    let response = app
        .post_login(&json!({ "email": "a@x.com", "password": "12345" }))
        .await;
    assert_eq!(response.status().as_u16(), 422);
    assert_eq!(error_code(response).await, "USER_NOT_VERIFIED");

    let response = app
        .post_verify(&json!({ "id": registered["user"]["verification"] }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "email": "a@x.com", "verified": true }));

    let response = app
        .post_login(&json!({ "email": "a@x.com", "password": "12345" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["verified"], true);
    assert_eq!(body["user"]["_id"], registered["user"]["_id"]);
}

#[tokio::test]
async fn login_failures_have_distinct_codes() {
    let app = TestApp::new().await;
    app.verified_login("a@x.com").await;

    let unknown = app
        .post_login(&json!({ "email": "b@x.com", "password": "12345" }))
        .await;
    assert_eq!(unknown.status().as_u16(), 401);
    assert_eq!(error_code(unknown).await, "USER_NOT_FOUND");

    let wrong = app
        .post_login(&json!({ "email": "a@x.com", "password": "54321" }))
        .await;
    assert_eq!(wrong.status().as_u16(), 401);
    assert_eq!(error_code(wrong).await, "WRONG_PASSWORD");
}

#[tokio::test]
async fn unverified_account_with_wrong_password_is_wrong_password() {
    let app = TestApp::new().await;
    app.register("A", "a@x.com").await;

    let response = app
        .post_login(&json!({ "email": "a@x.com", "password": "54321" }))
        .await;

    assert_eq!(error_code(response).await, "WRONG_PASSWORD");
}

#[tokio::test]
async fn seeded_admin_can_log_in() {
    let app = TestApp::new().await;

    let response = app
        .post_login(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["verified"], true);
}
