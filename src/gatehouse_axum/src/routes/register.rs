use axum::{extract::State, response::Response};
use gatehouse_adapters::{
    AppState,
    handlers::{self, RegisterRequest},
};
use gatehouse_core::{AccountStore, EmailClient, PasswordHasher, TokenIssuer};

use crate::{adapters::response_builder, error::RouteError, extract::ValidJson};

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, H, T, E>(
    State(state): State<AppState<S, H, T, E>>,
    ValidJson(request): ValidJson<RegisterRequest>,
) -> Result<Response, RouteError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    Ok(handlers::handle_register(&state, request, response_builder()).await?)
}
