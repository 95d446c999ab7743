use gatehouse_application::ForgotPasswordUseCase;
use gatehouse_core::{
    AccountError, AccountStore, Email, EmailClient, ResponseBuilder, ResponseHelpers,
};
use serde::Deserialize;
use serde_json::json;

use super::{AppState, required};

#[derive(Debug, Default, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Issues a reset token. The token only appears in the response when tokens are exposed.
pub async fn handle_forgot_password<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    request: ForgotPasswordRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    E: EmailClient,
    B: ResponseBuilder,
{
    let email = Email::parse(required("email", request.email)?)?;

    let reset_token = ForgotPasswordUseCase::new(&state.store, &state.email_client)
        .execute(email)
        .await?;

    let body = if state.expose_tokens {
        json!({ "msg": "RESET_EMAIL_SENT", "verification": reset_token.as_str() })
    } else {
        json!({ "msg": "RESET_EMAIL_SENT" })
    };

    Ok(builder.ok_json(body))
}
