use gatehouse_core::{
    Account, AccountError, AccountStore, Email, EmailClient, Name, Password, PasswordHasher, Role,
    TokenIssuer, UpdateGuard, VerificationToken,
};

use crate::{
    notifications::{self, VERIFICATION_SUBJECT, VerificationEmail},
    use_cases::Session,
};

/// Register use case - creates an unverified account and sends its verification token
pub struct RegisterUseCase<'a, S, H, T, E>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
    E: EmailClient,
{
    store: &'a S,
    hasher: &'a H,
    issuer: &'a T,
    email_client: &'a E,
}

impl<'a, S, H, T, E> RegisterUseCase<'a, S, H, T, E>
where
    S: AccountStore,
    H: PasswordHasher,
    T: TokenIssuer,
    E: EmailClient,
{
    pub fn new(store: &'a S, hasher: &'a H, issuer: &'a T, email_client: &'a E) -> Self {
        Self {
            store,
            hasher,
            issuer,
            email_client,
        }
    }

    /// Execute the register use case
    ///
    /// Uniqueness of `email` is decided by the store's insert, so two concurrent
    /// registrations of one address produce exactly one account. If the verification
    /// mail cannot be delivered the new account is removed again and the address stays free.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: Name,
        email: Email,
        password: Password,
    ) -> Result<Session, AccountError> {
        let password_hash = self.hasher.hash(&password).await?;
        let account = self
            .store
            .insert(Account::register(name, email, password_hash, Role::User))
            .await?;

        if let Some(token) = &account.verification_token {
            let message = VerificationEmail {
                name: account.name.as_str(),
                token: token.as_str(),
            };
            if let Err(error) = notifications::deliver(
                self.email_client,
                &account.email,
                VERIFICATION_SUBJECT,
                &message,
            )
            .await
            {
                self.discard(&account, token).await;
                return Err(error);
            }
        }

        let token = self.issuer.issue(&account)?;
        tracing::info!(account_id = %account.id, "Account registered");

        Ok(Session { token, account })
    }

    async fn discard(&self, account: &Account, token: &VerificationToken) {
        let guard = UpdateGuard::VerificationToken(token.clone());
        if let Err(e) = self.store.delete_by_id(&account.id, guard).await {
            tracing::error!(
                account_id = %account.id,
                error = %e,
                "Failed to remove account after undelivered verification email"
            );
        }
    }
}
