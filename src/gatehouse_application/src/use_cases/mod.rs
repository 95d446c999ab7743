use gatehouse_core::{Account, BearerToken};

pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod seed_admin;
pub mod verify;

/// An account together with a freshly issued bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: BearerToken,
    pub account: Account,
}
