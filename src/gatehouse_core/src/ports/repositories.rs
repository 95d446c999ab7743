use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    account::Account,
    account_id::AccountId,
    email::Email,
    name::Name,
    password_hash::PasswordHash,
    tokens::{ResetToken, VerificationToken},
};

// AccountStore port trait and errors
#[derive(Debug, Error)]
pub enum AccountStoreError {
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Account not found")]
    NotFound,
    #[error("Precondition failed")]
    PreconditionFailed,
    #[error("Store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for AccountStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::EmailAlreadyExists, Self::EmailAlreadyExists)
                | (Self::NotFound, Self::NotFound)
                | (Self::PreconditionFailed, Self::PreconditionFailed)
                | (Self::Timeout(_), Self::Timeout(_))
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Precondition checked atomically with an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateGuard {
    None,
    VerificationToken(VerificationToken),
    ResetToken(ResetToken),
}

impl UpdateGuard {
    pub fn holds_for(&self, account: &Account) -> bool {
        match self {
            UpdateGuard::None => true,
            UpdateGuard::VerificationToken(token) => {
                account.verification_token.as_ref() == Some(token)
            }
            UpdateGuard::ResetToken(token) => account.reset_token.as_ref() == Some(token),
        }
    }
}

/// Field changes applied by `AccountStore::update_by_id`.
///
/// `None` leaves a field untouched; for the nullable token fields `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub name: Option<Name>,
    pub password_hash: Option<PasswordHash>,
    pub verified: Option<bool>,
    pub verification_token: Option<Option<VerificationToken>>,
    pub reset_token: Option<Option<ResetToken>>,
}

impl AccountPatch {
    pub fn mark_verified() -> Self {
        Self {
            verified: Some(true),
            verification_token: Some(None),
            ..Default::default()
        }
    }

    pub fn begin_reset(token: ResetToken) -> Self {
        Self {
            reset_token: Some(Some(token)),
            ..Default::default()
        }
    }

    pub fn complete_reset(password_hash: PasswordHash) -> Self {
        Self {
            password_hash: Some(password_hash),
            reset_token: Some(None),
            ..Default::default()
        }
    }

    pub fn rename(name: Name) -> Self {
        Self {
            name: Some(name),
            ..Default::default()
        }
    }

    pub fn apply_to(self, account: &mut Account, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            account.name = name;
        }
        if let Some(password_hash) = self.password_hash {
            account.password_hash = password_hash;
        }
        if let Some(verified) = self.verified {
            account.verified = verified;
        }
        if let Some(token) = self.verification_token {
            account.verification_token = token;
        }
        if let Some(token) = self.reset_token {
            account.reset_token = token;
        }
        account.updated_at = now;
    }
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account. Fails with `EmailAlreadyExists` when the email is taken,
    /// checked in the same atomic step as the write.
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError>;
    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError>;
    async fn find_by_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Account, AccountStoreError>;
    async fn find_by_reset_token(&self, token: &ResetToken) -> Result<Account, AccountStoreError>;
    /// Applies `patch` if `guard` still holds, returning the updated account.
    async fn update_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
        patch: AccountPatch,
    ) -> Result<Account, AccountStoreError>;
    /// Removes the account if `guard` still holds.
    async fn delete_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
    ) -> Result<(), AccountStoreError>;
}
