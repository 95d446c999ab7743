//! Axum implementations of the framework-neutral HTTP traits.
//!
//! `ResponseBuilder` is defined in `gatehouse_core`; it is implemented here for a wrapper
//! around Axum's response builder, so the orphan rule is not an issue:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  gatehouse_core::ResponseBuilder (trait)   │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumResponseBuilder                       │
//! │  impl ResponseBuilder for it               │
//! └────────────────────────────────────────────┘
//! ```

use axum::{
    body::Body,
    http::{Response, StatusCode, request::Parts},
};
use gatehouse_core::{InboundRequest, ResponseBuilder};
use serde_json::Value;

/// Wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    /// An invalid status or header set earlier yields a bare 500 instead of a panic.
    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder
            .body(Body::from(body))
            .unwrap_or_else(|error| {
                tracing::error!(%error, "Failed to build response");
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
            })
    }
}

/// Helper function to create an Axum response builder
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}

/// Snapshot of request head and parsed body for the interceptor pipeline.
///
/// Headers whose value is not valid UTF-8 are left out.
pub fn inbound_request(parts: &Parts, body: Value) -> InboundRequest {
    parts
        .headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
        .fold(
            InboundRequest::new(parts.method.as_str(), parts.uri.path()),
            |request, (name, value)| request.with_header(name, value),
        )
        .with_body(body)
}
