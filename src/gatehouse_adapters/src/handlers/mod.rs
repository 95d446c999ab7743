//! Framework-agnostic account handlers.
//!
//! Each handler takes the already-deserialized request body, validates it into domain
//! types, runs one use case and renders the outcome through a [`ResponseBuilder`].
//! Framework routes only extract the body and pick a builder.
//!
//! [`ResponseBuilder`]: gatehouse_core::ResponseBuilder

pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod verify;

pub use forgot_password::{ForgotPasswordRequest, handle_forgot_password};
pub use login::{LoginRequest, handle_login};
pub use profile::{UpdateProfileRequest, handle_get_profile, handle_update_profile};
pub use register::{RegisterRequest, handle_register};
pub use reset_password::{ResetPasswordRequest, handle_reset_password};
pub use verify::{VerifyRequest, handle_verify};

use gatehouse_core::{Account, Claims, PublicAccount, RequestContext, ValidationError};

/// The ports every handler works against, plus response policy.
#[derive(Clone)]
pub struct AppState<S, H, T, E> {
    pub store: S,
    pub hasher: H,
    pub issuer: T,
    pub email_client: E,
    /// Echo verification and reset tokens back to the client.
    pub expose_tokens: bool,
}

impl<S, H, T, E> AppState<S, H, T, E> {
    pub fn new(store: S, hasher: H, issuer: T, email_client: E) -> Self {
        Self {
            store,
            hasher,
            issuer,
            email_client,
            expose_tokens: false,
        }
    }

    pub fn with_exposed_tokens(mut self, expose_tokens: bool) -> Self {
        self.expose_tokens = expose_tokens;
        self
    }

    /// The public JSON view of `account` under this state's token policy.
    pub(crate) fn public_view(&self, account: &Account) -> PublicAccount {
        let view = account.public_view();
        if self.expose_tokens {
            view.with_verification(account.verification_token.as_ref())
        } else {
            view
        }
    }
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::missing(field))
}

pub(crate) fn claims(context: &RequestContext) -> Result<&Claims, gatehouse_core::AccountError> {
    context
        .claims()
        .ok_or(gatehouse_core::AccountError::Unauthorized)
}
