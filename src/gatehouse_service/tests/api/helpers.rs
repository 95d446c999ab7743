use std::time::Duration;

use gatehouse_adapters::{
    AppState, Argon2Hasher, HashMapAccountStore, JwtConfig, JwtTokenIssuer, MockEmailClient,
    TimedAccountStore,
    config::{AdminSettings, AllowedOrigins, test},
};
use gatehouse_service::{AccountService, bootstrap::seed_admin};
use reqwest::{Client, Response};
use secrecy::Secret;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub const ADMIN_EMAIL: &str = "admin@admin.com";
pub const ADMIN_PASSWORD: &str = "12345";
pub const ALLOWED_ORIGIN: &str = "http://allowed.example";
pub const BODY_LIMIT: usize = 64 * 1024;

pub struct TestApp {
    pub address: String,
    pub http_client: Client,
    pub email_client: MockEmailClient,
    pub store: HashMapAccountStore,
}

impl TestApp {
    /// A service with tokens echoed in responses and a seeded admin.
    pub async fn new() -> Self {
        Self::spawn(true).await
    }

    pub async fn spawn(expose_tokens: bool) -> Self {
        let store = HashMapAccountStore::new();
        let email_client = MockEmailClient::new();
        let hasher = Argon2Hasher::new(8, 1, 1).unwrap();
        let issuer = JwtTokenIssuer::new(JwtConfig {
            jwt_secret: Secret::new("api-test-secret".to_string()),
            token_ttl_in_seconds: 600,
        });

        seed_admin(
            &store,
            &hasher,
            &AdminSettings {
                name: "Admin".to_string(),
                email: ADMIN_EMAIL.to_string(),
                password: Secret::new(ADMIN_PASSWORD.to_string()),
            },
        )
        .await
        .unwrap();

        let state = AppState::new(
            TimedAccountStore::new(store.clone(), Duration::from_secs(5)),
            hasher,
            issuer,
            email_client.clone(),
        )
        .with_exposed_tokens(expose_tokens);

        let listener = TcpListener::bind(test::APP_ADDRESS).await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());

        let service = AccountService::new(state, "assets", BODY_LIMIT);
        tokio::spawn(service.run_standalone(listener, Some(AllowedOrigins::new([ALLOWED_ORIGIN]))));

        Self {
            address,
            http_client: Client::new(),
            email_client,
            store,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, body: &Value) -> Response {
        self.post("/register", body).await
    }

    pub async fn post_login(&self, body: &Value) -> Response {
        self.post("/login", body).await
    }

    pub async fn post_verify(&self, body: &Value) -> Response {
        self.post("/verify", body).await
    }

    pub async fn post_forgot(&self, body: &Value) -> Response {
        self.post("/forgot", body).await
    }

    pub async fn post_reset(&self, body: &Value) -> Response {
        self.post("/reset", body).await
    }

    pub async fn get_profile(&self, token: Option<&str>) -> Response {
        let mut request = self.http_client.get(self.url("/profile"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn patch_profile(&self, token: &str, body: &Value) -> Response {
        self.http_client
            .patch(self.url("/profile"))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Registers `email` with password `12345` and returns the response body.
    pub async fn register(&self, name: &str, email: &str) -> Value {
        let response = self
            .post_register(&json!({ "name": name, "email": email, "password": "12345" }))
            .await;
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.unwrap()
    }

    /// Registers and verifies `email`, then logs in and returns the bearer token.
    pub async fn verified_login(&self, email: &str) -> String {
        let registered = self.register("A", email).await;
        let response = self
            .post_verify(&json!({ "id": registered["user"]["verification"] }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let response = self
            .post_login(&json!({ "email": email, "password": "12345" }))
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }
}

/// The `errors.msg` code of an error response.
pub async fn error_code(response: Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["errors"]["msg"].as_str().unwrap_or_default().to_string()
}
