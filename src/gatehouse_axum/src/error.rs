use axum::response::{IntoResponse, Response};
use gatehouse_core::{AccountError, ErrorKind, ResponseHelpers, ValidationError};
use thiserror::Error;

use crate::adapters::response_builder;

/// An [`AccountError`] on its way out of an Axum route.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct RouteError(#[from] pub AccountError);

impl From<ValidationError> for RouteError {
    fn from(error: ValidationError) -> Self {
        Self(error.into())
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        match self.0.kind() {
            ErrorKind::Store => tracing::error!(error = %self.0, "Request failed"),
            _ => tracing::debug!(error = %self.0, "Request rejected"),
        }
        response_builder().error(&self.0)
    }
}
