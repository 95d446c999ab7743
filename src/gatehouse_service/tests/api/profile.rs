use serde_json::{Value, json};

use crate::helpers::{TestApp, error_code};

#[tokio::test]
async fn profile_requires_a_bearer_token() {
    let app = TestApp::new().await;

    let missing = app.get_profile(None).await;
    assert_eq!(missing.status().as_u16(), 401);
    assert_eq!(error_code(missing).await, "UNAUTHORIZED");

    let garbage = app.get_profile(Some("not.a.jwt")).await;
    assert_eq!(garbage.status().as_u16(), 401);
    assert_eq!(error_code(garbage).await, "UNAUTHORIZED");
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = TestApp::new().await;
    let token = app.verified_login("a@x.com").await;

    let (head, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{head}.{flipped}{}", &signature[1..]);

    let response = app.get_profile(Some(&tampered)).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn profile_returns_the_public_account() {
    let app = TestApp::new().await;
    let token = app.verified_login("a@x.com").await;

    let response = app.get_profile(Some(&token)).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "user");
    assert_eq!(body["verified"], true);
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn registration_token_is_accepted_before_verification() {
    let app = TestApp::new().await;
    let registered = app.register("A", "a@x.com").await;

    let response = app
        .get_profile(registered["token"].as_str())
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn profile_name_can_be_updated() {
    let app = TestApp::new().await;
    let token = app.verified_login("a@x.com").await;

    let response = app.patch_profile(&token, &json!({ "name": "  Ada " })).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["name"], "Ada");

    let body: Value = app.get_profile(Some(&token)).await.json().await.unwrap();
    assert_eq!(body["name"], "Ada");
}

#[tokio::test]
async fn profile_update_validates_name() {
    let app = TestApp::new().await;
    let token = app.verified_login("a@x.com").await;

    let response = app.patch_profile(&token, &json!({ "name": "   " })).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "errors": { "msg": "IS_EMPTY", "param": "name" } }));
}
