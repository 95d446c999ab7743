use gatehouse_application::VerifyUseCase;
use gatehouse_core::{
    AccountError, AccountStore, ResponseBuilder, ResponseHelpers, ValidationError,
    VerificationToken,
};
use serde::Deserialize;
use serde_json::json;

use super::{AppState, required};

#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    /// The verification token.
    pub id: Option<String>,
}

/// Consumes a verification token and answers `{email, verified}`.
pub async fn handle_verify<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    request: VerifyRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    B: ResponseBuilder,
{
    let id = required("id", request.id)?;
    if id.is_empty() {
        return Err(ValidationError::empty("id").into());
    }

    let account = VerifyUseCase::new(&state.store)
        .execute(VerificationToken::from(id))
        .await?;

    Ok(builder.ok_json(json!({
        "email": account.email,
        "verified": account.verified,
    })))
}
