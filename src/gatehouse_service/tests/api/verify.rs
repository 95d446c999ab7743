use serde_json::{Value, json};

use crate::helpers::{TestApp, error_code};

#[tokio::test]
async fn verification_token_is_single_use() {
    let app = TestApp::new().await;
    let registered = app.register("A", "a@x.com").await;
    let token = registered["user"]["verification"].clone();

    let first = app.post_verify(&json!({ "id": token })).await;
    assert_eq!(first.status().as_u16(), 200);

    for _ in 0..2 {
        let again = app.post_verify(&json!({ "id": token })).await;
        assert_eq!(again.status().as_u16(), 404);
        assert_eq!(error_code(again).await, "NOT_FOUND");
    }
}

#[tokio::test]
async fn concurrent_verifications_have_one_winner() {
    let app = TestApp::new().await;
    let registered = app.register("A", "a@x.com").await;
    let token = registered["user"]["verification"].clone();

    let attempts: Vec<_> = (0..6)
        .map(|_| {
            let client = app.http_client.clone();
            let url = app.url("/verify");
            let body = json!({ "id": token });
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&body)
                    .send()
                    .await
                    .unwrap()
                    .status()
                    .as_u16()
            })
        })
        .collect();

    let mut winners = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            200 => winners += 1,
            status => assert_eq!(status, 404),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = TestApp::new().await;

    let response = app.post_verify(&json!({ "id": "not-a-token" })).await;

    assert_eq!(response.status().as_u16(), 404);
    assert_eq!(error_code(response).await, "NOT_FOUND");
}

#[tokio::test]
async fn missing_token_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app.post_verify(&json!({})).await;

    assert_eq!(response.status().as_u16(), 422);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "errors": { "msg": "MISSING", "param": "id" } }));
}

#[tokio::test]
async fn hidden_tokens_still_arrive_by_email() {
    let app = TestApp::spawn(false).await;
    let registered = app.register("A", "a@x.com").await;
    assert!(registered["user"].get("verification").is_none());

    let sent = app.email_client.last_sent_to("a@x.com").await.unwrap();
    let response = app.post_verify(&json!({ "id": sent.token() })).await;

    assert_eq!(response.status().as_u16(), 200);
}
