use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    account_id::AccountId,
    email::Email,
    name::Name,
    password_hash::PasswordHash,
    role::Role,
    tokens::{ResetToken, VerificationToken},
};

/// A registered account and its authentication state.
///
/// `verification_token` is present exactly while the account is unverified, and
/// `reset_token` only while a password reset is pending.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: Name,
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub verified: bool,
    pub verification_token: Option<VerificationToken>,
    pub reset_token: Option<ResetToken>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// A freshly registered, unverified account with a new verification token.
    pub fn register(name: Name, email: Email, password_hash: PasswordHash, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: AccountId::new(),
            name,
            email,
            password_hash,
            role,
            verified: false,
            verification_token: Some(VerificationToken::generate()),
            reset_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// An account that starts out verified, used for seeded administrators.
    pub fn preverified(name: Name, email: Email, password_hash: PasswordHash, role: Role) -> Self {
        Self {
            verified: true,
            verification_token: None,
            ..Self::register(name, email, password_hash, role)
        }
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset_token.is_some()
    }

    pub fn public_view(&self) -> PublicAccount {
        PublicAccount {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            verified: self.verified,
            verification: None,
        }
    }
}

/// The fields of an account that may leave the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicAccount {
    #[serde(rename = "_id")]
    pub id: AccountId,
    pub name: Name,
    pub email: Email,
    pub role: Role,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification: Option<String>,
}

impl PublicAccount {
    pub fn with_verification(mut self, token: Option<&VerificationToken>) -> Self {
        self.verification = token.map(|t| t.as_str().to_string());
        self
    }
}
