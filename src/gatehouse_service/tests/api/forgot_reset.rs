use serde_json::{Value, json};

use crate::helpers::{TestApp, error_code};

async fn forgot(app: &TestApp, email: &str) -> Value {
    let response = app.post_forgot(&json!({ "email": email })).await;
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn reset_changes_the_password() {
    let app = TestApp::new().await;
    app.verified_login("a@x.com").await;

    let body = forgot(&app, "a@x.com").await;
    assert_eq!(body["msg"], "RESET_EMAIL_SENT");
    let token = body["verification"].clone();

    let response = app
        .post_reset(&json!({ "id": token, "password": "67890" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "msg": "PASSWORD_CHANGED" }));

    let old = app
        .post_login(&json!({ "email": "a@x.com", "password": "12345" }))
        .await;
    assert_eq!(error_code(old).await, "WRONG_PASSWORD");

    let new = app
        .post_login(&json!({ "email": "a@x.com", "password": "67890" }))
        .await;
    assert_eq!(new.status().as_u16(), 200);

    let replay = app
        .post_reset(&json!({ "id": token, "password": "abcde" }))
        .await;
    assert_eq!(replay.status().as_u16(), 404);
    assert_eq!(error_code(replay).await, "NOT_FOUND");
}

#[tokio::test]
async fn only_the_latest_reset_token_is_valid() {
    let app = TestApp::new().await;
    app.verified_login("a@x.com").await;

    let first = forgot(&app, "a@x.com").await["verification"].clone();
    let second = forgot(&app, "a@x.com").await["verification"].clone();

    let stale = app
        .post_reset(&json!({ "id": first, "password": "67890" }))
        .await;
    assert_eq!(stale.status().as_u16(), 404);

    let fresh = app
        .post_reset(&json!({ "id": second, "password": "67890" }))
        .await;
    assert_eq!(fresh.status().as_u16(), 200);
}

#[tokio::test]
async fn forgot_for_unknown_email_is_not_found() {
    let app = TestApp::new().await;

    let response = app.post_forgot(&json!({ "email": "ghost@x.com" })).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(error_code(response).await, "NOT_FOUND");
}

#[tokio::test]
async fn reset_token_is_withheld_unless_exposed() {
    let app = TestApp::spawn(false).await;
    app.register("A", "a@x.com").await;

    let body = forgot(&app, "a@x.com").await;
    assert_eq!(body, json!({ "msg": "RESET_EMAIL_SENT" }));

    let sent = app.email_client.last_sent_to("a@x.com").await.unwrap();
    let response = app
        .post_reset(&json!({ "id": sent.token(), "password": "67890" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn reset_rejects_short_password() {
    let app = TestApp::new().await;
    app.register("A", "a@x.com").await;
    let token = forgot(&app, "a@x.com").await["verification"].clone();

    let response = app.post_reset(&json!({ "id": token, "password": "1" })).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["param"], "password");
}
