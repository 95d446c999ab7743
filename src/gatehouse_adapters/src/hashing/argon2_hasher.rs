use argon2::{
    Algorithm, Argon2, Params, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use gatehouse_core::{HashError, Password, PasswordHash, PasswordHasher};
use secrecy::ExposeSecret;

/// Argon2id password hashing, run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// `memory_kib` is the memory cost in KiB; see [`Params::new`] for the valid ranges.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::Hashing(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
        let current_span: tracing::Span = tracing::Span::current();
        let password = password.clone();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                Self::argon2(params)
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(h.to_string()))
                    .map_err(|e| HashError::Hashing(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashError::Task(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HashError> {
        let current_span: tracing::Span = tracing::Span::current();
        let password = password.clone();
        let hash = hash.clone();
        let params = self.params.clone();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = argon2::PasswordHash::new(hash.as_str())
                    .map_err(|e| HashError::MalformedHash(e.to_string()))?;

                // Cost parameters are read back from the stored hash.
                match Self::argon2(params)
                    .verify_password(password.as_ref().expose_secret().as_bytes(), &expected)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HashError::Hashing(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HashError::Task(e.to_string()))?
    }
}
