use axum::{extract::State, response::Response};
use gatehouse_adapters::{
    AppState,
    handlers::{self, ResetPasswordRequest},
};
use gatehouse_core::{AccountStore, EmailClient, PasswordHasher, TokenIssuer};

use crate::{adapters::response_builder, error::RouteError, extract::ValidJson};

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<S, H, T, E>(
    State(state): State<AppState<S, H, T, E>>,
    ValidJson(request): ValidJson<ResetPasswordRequest>,
) -> Result<Response, RouteError>
where
    S: AccountStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    Ok(handlers::handle_reset_password(&state, request, response_builder()).await?)
}
