use secrecy::{ExposeSecret, Secret};

/// An encoded password hash (PHC string format).
#[derive(Debug, Clone)]
pub struct PasswordHash(Secret<String>);

impl PasswordHash {
    pub fn new(encoded: String) -> Self {
        Self(Secret::new(encoded))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}
