use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    account::Account, claims::Claims, email::Email, password::Password,
    password_hash::PasswordHash, tokens::BearerToken,
};

/// Port trait for email sending service
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to hash password: {0}")]
    Hashing(String),
    #[error("Stored hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Hashing task failed: {0}")]
    Task(String),
}

/// Port trait for one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;
    /// `Ok(false)` on mismatch; `Err` only when verification itself could not run.
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HashError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing token")]
    Missing,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Token expired")]
    Expired,
    #[error("Failed to issue token: {0}")]
    Issue(String),
}

/// Port trait for signed bearer tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> Result<BearerToken, TokenError>;
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;
}
