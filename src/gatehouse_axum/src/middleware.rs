//! Runs an interceptor [`Pipeline`] in front of a group of routes.
//!
//! The body is buffered up to the configured limit and parsed as JSON so interceptors can
//! inspect and rewrite it. The possibly rewritten body replaces the original, and the
//! resulting [`RequestContext`] is stored as a request extension for the route to extract.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{Request, State},
    http::{HeaderValue, header::CONTENT_LENGTH},
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_core::{AccountError, Pipeline, RequestContext, ValidationError};
use serde_json::Value;

use crate::{adapters::inbound_request, error::RouteError};

#[derive(Clone)]
pub struct PipelineState {
    pipeline: Pipeline,
    body_limit: usize,
}

impl PipelineState {
    pub fn new(pipeline: Pipeline, body_limit: usize) -> Self {
        Self {
            pipeline,
            body_limit,
        }
    }
}

/// Use with `axum::middleware::from_fn_with_state`.
pub async fn intercept(State(state): State<PipelineState>, request: Request, next: Next) -> Response {
    match run_pipeline(&state, request).await {
        Ok(request) => next.run(request).await,
        Err(error) => RouteError(error).into_response(),
    }
}

async fn run_pipeline(state: &PipelineState, request: Request) -> Result<Request, AccountError> {
    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, state.body_limit).await.map_err(|error| {
        tracing::debug!(%error, limit = state.body_limit, "Failed to read request body");
        ValidationError::new("body", "BODY_TOO_LARGE")
    })?;

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(|_| ValidationError::new("body", "MALFORMED_BODY"))?
    };

    let (inbound, context) = state
        .pipeline
        .run(inbound_request(&parts, json), RequestContext::default())?;

    let body = match inbound.into_body() {
        Value::Null if bytes.is_empty() => Bytes::new(),
        value => Bytes::from(value.to_string()),
    };

    parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    parts.extensions.insert(context);

    Ok(Request::from_parts(parts, Body::from(body)))
}
