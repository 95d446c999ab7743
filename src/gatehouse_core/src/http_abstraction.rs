//! HTTP abstraction traits shared by handlers and web framework adapters.
//!
//! Handlers in `gatehouse_adapters` only see these traits, so the account lifecycle can be
//! served by any framework that provides a request view and a response builder.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_core: RequestHeaders,         │
//! │                  ResponseBuilder         │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_axum: AxumResponseBuilder     │
//! │  impl ResponseBuilder for it             │
//! └──────────────────────────────────────────┘
//! ```

use serde_json::json;

use crate::error::AccountError;

/// Read-only view of an incoming request.
pub trait RequestHeaders {
    /// Get a header value by name.
    ///
    /// Header lookup is case-insensitive.
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;

    /// The credential of an `Authorization: Bearer <token>` header, if any.
    fn bearer_token(&self) -> Option<&str> {
        let (scheme, token) = self.header("authorization")?.trim().split_once(' ')?;
        let token = token.trim();
        (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
    }
}

/// Trait for building HTTP responses.
///
/// This follows the builder pattern, allowing method chaining:
/// ```ignore
/// builder
///     .status(201)
///     .json_body(json!({"token": token, "user": user}))
///     .build()
/// ```
pub trait ResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for the responses the service sends.
///
/// Automatically implemented for all types that implement `ResponseBuilder`.
pub trait ResponseHelpers: ResponseBuilder {
    /// Create a 200 OK JSON response
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// Create a 201 Created JSON response
    fn created_json(self, body: serde_json::Value) -> Self::Response {
        self.status(201).json_body(body).build()
    }

    /// Render an [`AccountError`] as `{"errors": {"msg": CODE}}`.
    ///
    /// Validation failures also name the offending field under `"param"`.
    fn error(self, error: &AccountError) -> Self::Response {
        let body = match error.param() {
            Some(param) => json!({ "errors": { "msg": error.code(), "param": param } }),
            None => json!({ "errors": { "msg": error.code() } }),
        };
        self.status(error.status()).json_body(body).build()
    }
}

// Blanket implementation for all ResponseBuilder types
impl<T: ResponseBuilder> ResponseHelpers for T {}
