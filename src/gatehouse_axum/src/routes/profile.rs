//! Profile routes.
//!
//! These expect the bearer pipeline to run first and leave a [`RequestContext`] in the
//! request extensions.

use axum::{Extension, extract::State, response::Response};
use gatehouse_adapters::{
    AppState,
    handlers::{self, UpdateProfileRequest},
};
use gatehouse_core::{AccountStore, EmailClient, PasswordHasher, RequestContext, TokenIssuer};

use crate::{adapters::response_builder, error::RouteError, extract::ValidJson};

#[tracing::instrument(name = "Get profile", skip_all)]
pub async fn get_profile<S, H, T, E>(
    State(state): State<AppState<S, H, T, E>>,
    Extension(context): Extension<RequestContext>,
) -> Result<Response, RouteError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    Ok(handlers::handle_get_profile(&state, &context, response_builder()).await?)
}

#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile<S, H, T, E>(
    State(state): State<AppState<S, H, T, E>>,
    Extension(context): Extension<RequestContext>,
    ValidJson(request): ValidJson<UpdateProfileRequest>,
) -> Result<Response, RouteError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    Ok(handlers::handle_update_profile(&state, &context, request, response_builder()).await?)
}
