//! Error taxonomy shared by every layer.
//!
//! Port errors (`AccountStoreError`, `HashError`, `TokenError`) convert into
//! [`AccountError`], which is the single outcome an operation reports. Each variant
//! belongs to exactly one [`ErrorKind`] and carries a stable code string that clients
//! can match on.

use thiserror::Error;

use crate::ports::{
    repositories::AccountStoreError,
    services::{HashError, TokenError},
};

/// Coarse classification of failures, mirrored by HTTP status families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Auth,
    Store,
}

/// A field that failed validation at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {code}")]
pub struct ValidationError {
    pub field: &'static str,
    pub code: &'static str,
}

impl ValidationError {
    pub const fn new(field: &'static str, code: &'static str) -> Self {
        Self { field, code }
    }

    pub const fn missing(field: &'static str) -> Self {
        Self::new(field, "MISSING")
    }

    pub const fn empty(field: &'static str) -> Self {
        Self::new(field, "IS_EMPTY")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Not found")]
    NotFound,
    #[error("User not found")]
    UserNotFound,
    #[error("User not verified")]
    UserNotVerified,
    #[error("Wrong password")]
    WrongPassword,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Store error: {0}")]
    Store(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::Validation(_) => ErrorKind::Validation,
            AccountError::EmailAlreadyExists => ErrorKind::Conflict,
            AccountError::NotFound => ErrorKind::NotFound,
            AccountError::UserNotFound
            | AccountError::UserNotVerified
            | AccountError::WrongPassword
            | AccountError::Unauthorized => ErrorKind::Auth,
            AccountError::Store(_) | AccountError::Internal(_) | AccountError::Delivery(_) => {
                ErrorKind::Store
            }
        }
    }

    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::Validation(e) => e.code,
            AccountError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AccountError::NotFound => "NOT_FOUND",
            AccountError::UserNotFound => "USER_NOT_FOUND",
            AccountError::UserNotVerified => "USER_NOT_VERIFIED",
            AccountError::WrongPassword => "WRONG_PASSWORD",
            AccountError::Unauthorized => "UNAUTHORIZED",
            AccountError::Store(_) => "STORE_ERROR",
            AccountError::Internal(_) => "INTERNAL_ERROR",
            AccountError::Delivery(_) => "DELIVERY_FAILED",
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            AccountError::Validation(_)
            | AccountError::EmailAlreadyExists
            | AccountError::UserNotVerified => 422,
            AccountError::NotFound => 404,
            AccountError::UserNotFound
            | AccountError::WrongPassword
            | AccountError::Unauthorized => 401,
            AccountError::Store(_) | AccountError::Internal(_) | AccountError::Delivery(_) => 500,
        }
    }

    /// The offending request field, for validation failures only.
    pub fn param(&self) -> Option<&'static str> {
        match self {
            AccountError::Validation(e) => Some(e.field),
            _ => None,
        }
    }
}

impl From<AccountStoreError> for AccountError {
    fn from(error: AccountStoreError) -> Self {
        match error {
            AccountStoreError::EmailAlreadyExists => AccountError::EmailAlreadyExists,
            // A failed guard means the token was consumed in between.
            AccountStoreError::NotFound | AccountStoreError::PreconditionFailed => {
                AccountError::NotFound
            }
            other @ (AccountStoreError::Timeout(_) | AccountStoreError::UnexpectedError(_)) => {
                AccountError::Store(other.to_string())
            }
        }
    }
}

impl From<HashError> for AccountError {
    fn from(error: HashError) -> Self {
        AccountError::Internal(error.to_string())
    }
}

impl From<TokenError> for AccountError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Issue(e) => AccountError::Internal(e),
            TokenError::Missing | TokenError::Invalid(_) | TokenError::Expired => {
                AccountError::Unauthorized
            }
        }
    }
}
