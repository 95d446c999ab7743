//! Profile handlers. Both expect the pipeline to have authenticated the request.

use gatehouse_application::{GetProfileUseCase, UpdateProfileUseCase};
use gatehouse_core::{
    AccountError, AccountStore, Name, RequestContext, ResponseBuilder, ResponseHelpers,
};
use serde::Deserialize;
use serde_json::json;

use super::{AppState, claims, required};

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
}

pub async fn handle_get_profile<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    context: &RequestContext,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    B: ResponseBuilder,
{
    let account = GetProfileUseCase::new(&state.store)
        .execute(claims(context)?)
        .await?;

    Ok(builder.ok_json(json!(state.public_view(&account))))
}

pub async fn handle_update_profile<S, H, T, E, B>(
    state: &AppState<S, H, T, E>,
    context: &RequestContext,
    request: UpdateProfileRequest,
    builder: B,
) -> Result<B::Response, AccountError>
where
    S: AccountStore,
    B: ResponseBuilder,
{
    let claims = claims(context)?;
    let name = Name::parse(required("name", request.name)?)?;

    let account = UpdateProfileUseCase::new(&state.store)
        .execute(claims, name)
        .await?;

    Ok(builder.ok_json(json!(state.public_view(&account))))
}
