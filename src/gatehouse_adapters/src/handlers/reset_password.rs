use gatehouse_application::ResetPasswordUseCase;
use gatehouse_core::{
    AccountError, AccountStore, Password, PasswordHasher, ResetToken, ResponseBuilder,
    ResponseHelpers, ValidationError,
};
use secrecy::Secret;
use serde::Deserialize;
use serde_json::json;

use super::{AppState, required};

#[derive(Debug, Default, Deserialize)]
pub struct ResetPasswordRequest {
    /// The reset token.
    pub id: Option<String>,
    pub password: Option<Secret<String>>,
}

pub async fn handle_reset_password<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    request: ResetPasswordRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    H: PasswordHasher,
    B: ResponseBuilder,
{
    let id = required("id", request.id)?;
    if id.is_empty() {
        return Err(ValidationError::empty("id").into());
    }
    let password = Password::parse(required("password", request.password)?)?;

    ResetPasswordUseCase::new(&state.store, &state.hasher)
        .execute(ResetToken::from(id), password)
        .await?;

    Ok(builder.ok_json(json!({ "msg": "PASSWORD_CHANGED" })))
}
