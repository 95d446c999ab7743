//! Framework-agnostic register handler.

use gatehouse_application::RegisterUseCase;
use gatehouse_core::{
    AccountError, AccountStore, Email, EmailClient, Name, Password, PasswordHasher,
    ResponseBuilder, ResponseHelpers, TokenIssuer,
};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use super::{AppState, required};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

/// Creates an unverified account and answers `201 {token, user}`.
pub async fn handle_register<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    request: RegisterRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
    E: EmailClient,
    B: ResponseBuilder,
{
    let name = Name::parse(required("name", request.name)?)?;
    let email = Email::parse(required("email", request.email)?)?;
    let password = Password::parse(required("password", request.password)?)?;

    let session = RegisterUseCase::new(
        &state.store,
        &state.hasher,
        &state.issuer,
        &state.email_client,
    )
    .execute(name, email, password)
    .await?;

    Ok(builder.created_json(json!({
        "token": session.token,
        "user": state.public_view(&session.account),
    })))
}
