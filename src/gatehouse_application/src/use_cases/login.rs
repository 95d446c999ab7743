use gatehouse_core::{
    AccountError, AccountStore, AccountStoreError, Email, Password, PasswordHasher, TokenIssuer,
};

use crate::use_cases::Session;

/// Login use case - checks credentials and issues a bearer token
pub struct LoginUseCase<'a, S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    store: &'a S,
    hasher: &'a H,
    issuer: &'a T,
}

impl<'a, S, H, T> LoginUseCase<'a, S, H, T>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(store: &'a S, hasher: &'a H, issuer: &'a T) -> Self {
        Self {
            store,
            hasher,
            issuer,
        }
    }

    /// Execute the login use case
    ///
    /// The password is checked before the verification flag, so `UserNotVerified` is only
    /// reported to callers who know the password.
    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<Session, AccountError> {
        let account = self
            .store
            .find_by_email(&email)
            .await
            .map_err(|e| match e {
                AccountStoreError::NotFound => AccountError::UserNotFound,
                other => other.into(),
            })?;

        if !self.hasher.verify(&password, &account.password_hash).await? {
            return Err(AccountError::WrongPassword);
        }

        if !account.verified {
            return Err(AccountError::UserNotVerified);
        }

        let token = self.issuer.issue(&account)?;
        Ok(Session { token, account })
    }
}
