use axum::{
    Json,
    extract::{FromRequest, Request},
};
use gatehouse_core::ValidationError;
use serde::de::DeserializeOwned;

use crate::error::RouteError;

/// `Json<T>` whose rejection is rendered in the service's error format.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = RouteError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(%rejection, "Rejected request body");
                ValidationError::new("body", "MALFORMED_BODY")
            })?;
        Ok(Self(value))
    }
}
