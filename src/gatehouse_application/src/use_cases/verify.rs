use gatehouse_core::{Account, AccountError, AccountPatch, AccountStore, UpdateGuard, VerificationToken};

/// Verify use case - consumes a verification token and marks the account verified
pub struct VerifyUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> VerifyUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Execute the verify use case
    ///
    /// The write is guarded on the token, so of two concurrent submissions only one
    /// succeeds; the other sees `NotFound` like any later retry.
    #[tracing::instrument(name = "VerifyUseCase::execute", skip_all)]
    pub async fn execute(&self, token: VerificationToken) -> Result<Account, AccountError> {
        let account = self.store.find_by_verification_token(&token).await?;

        let account = self
            .store
            .update_by_id(
                &account.id,
                UpdateGuard::VerificationToken(token),
                AccountPatch::mark_verified(),
            )
            .await?;

        tracing::info!(account_id = %account.id, "Account verified");
        Ok(account)
    }
}
