use secrecy::{ExposeSecret, Secret};

use crate::error::ValidationError;

pub const MIN_PASSWORD_LENGTH: usize = 5;

/// A plaintext password accepted at the boundary. Never stored, never logged.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(value: Secret<String>) -> Result<Self, ValidationError> {
        let length = value.expose_secret().chars().count();
        if length == 0 {
            return Err(ValidationError::empty("password"));
        }
        if length < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new("password", "PASSWORD_TOO_SHORT_MIN_5"));
        }
        Ok(Self(value))
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = ValidationError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
