use rand::{Rng, distr::Alphanumeric};
use serde::Serialize;

const TOKEN_LENGTH: usize = 48;

fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Single-use token proving control of the registered address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn generate() -> Self {
        Self(random_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VerificationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Single-use token authorizing one password change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetToken(String);

impl ResetToken {
    pub fn generate() -> Self {
        Self(random_token())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResetToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Signed credential handed to clients after register or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
