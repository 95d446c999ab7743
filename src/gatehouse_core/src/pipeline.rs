//! Composable request interceptors.
//!
//! An [`Interceptor`] takes a request and its context and either hands both on (possibly
//! rewritten) or rejects the request with an [`AccountError`]. A [`Pipeline`] runs its
//! interceptors in order and stops at the first rejection, so the route handler only ever
//! sees requests that every interceptor accepted.

use std::{collections::HashMap, sync::Arc};

use serde_json::Value;

use crate::{
    domain::{claims::Claims, role::Role},
    error::AccountError,
    http_abstraction::RequestHeaders,
    ports::services::TokenIssuer,
};

/// Framework-neutral snapshot of a request as seen by interceptors.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Value,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Header names are stored lowercase.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

impl RequestHeaders for InboundRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }
}

/// State accumulated while a request passes through the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    claims: Option<Claims>,
}

impl RequestContext {
    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn authenticated(mut self, claims: Claims) -> Self {
        self.claims = Some(claims);
        self
    }
}

pub trait Interceptor: Send + Sync {
    fn intercept(
        &self,
        request: InboundRequest,
        context: RequestContext,
    ) -> Result<(InboundRequest, RequestContext), AccountError>;
}

#[derive(Clone, Default)]
pub struct Pipeline {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    pub fn run(
        &self,
        request: InboundRequest,
        context: RequestContext,
    ) -> Result<(InboundRequest, RequestContext), AccountError> {
        self.interceptors
            .iter()
            .try_fold((request, context), |(request, context), interceptor| {
                interceptor.intercept(request, context)
            })
    }
}

/// Trims surrounding whitespace from every string in the JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimStrings;

fn trim_strings(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.trim().to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(trim_strings).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key, trim_strings(value)))
                .collect(),
        ),
        other => other,
    }
}

impl Interceptor for TrimStrings {
    fn intercept(
        &self,
        request: InboundRequest,
        context: RequestContext,
    ) -> Result<(InboundRequest, RequestContext), AccountError> {
        let body = trim_strings(request.body.clone());
        Ok((request.with_body(body), context))
    }
}

/// Requires a valid bearer token and records its claims in the context.
#[derive(Clone)]
pub struct RequireBearer<T> {
    issuer: T,
}

impl<T: TokenIssuer> RequireBearer<T> {
    pub fn new(issuer: T) -> Self {
        Self { issuer }
    }
}

impl<T: TokenIssuer> Interceptor for RequireBearer<T> {
    fn intercept(
        &self,
        request: InboundRequest,
        context: RequestContext,
    ) -> Result<(InboundRequest, RequestContext), AccountError> {
        let token = request.bearer_token().ok_or(AccountError::Unauthorized)?;
        let claims = self.issuer.validate(token)?;
        Ok((request, context.authenticated(claims)))
    }
}

/// Requires the authenticated role to be one of `allowed`.
#[derive(Debug, Clone)]
pub struct RequireRole {
    allowed: Vec<Role>,
}

impl RequireRole {
    pub fn new(allowed: impl IntoIterator<Item = Role>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

impl Interceptor for RequireRole {
    fn intercept(
        &self,
        request: InboundRequest,
        context: RequestContext,
    ) -> Result<(InboundRequest, RequestContext), AccountError> {
        match context.claims() {
            Some(claims) if self.allowed.contains(&claims.role) => Ok((request, context)),
            _ => Err(AccountError::Unauthorized),
        }
    }
}
