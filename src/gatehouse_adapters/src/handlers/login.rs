//! Framework-agnostic login handler.

use gatehouse_application::LoginUseCase;
use gatehouse_core::{
    AccountError, AccountStore, Email, Password, PasswordHasher, ResponseBuilder, ResponseHelpers,
    TokenIssuer,
};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use super::{AppState, required};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

pub async fn handle_login<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    request: LoginRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
    B: ResponseBuilder,
{
    let email = Email::parse(required("email", request.email)?)?;
    let password = Password::parse(required("password", request.password)?)?;

    let session = LoginUseCase::new(&state.store, &state.hasher, &state.issuer)
        .execute(email, password)
        .await?;

    Ok(builder.ok_json(json!({
        "token": session.token,
        "user": state.public_view(&session.account),
    })))
}
