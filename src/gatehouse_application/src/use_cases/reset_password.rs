use gatehouse_core::{
    AccountError, AccountPatch, AccountStore, Password, PasswordHasher, ResetToken, UpdateGuard,
};

/// Reset password use case - consumes a reset token and stores the new password hash
pub struct ResetPasswordUseCase<'a, S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> ResetPasswordUseCase<'a, S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: ResetToken,
        new_password: Password,
    ) -> Result<(), AccountError> {
        let account = self.store.find_by_reset_token(&token).await?;
        let password_hash = self.hasher.hash(&new_password).await?;

        self.store
            .update_by_id(
                &account.id,
                UpdateGuard::ResetToken(token),
                AccountPatch::complete_reset(password_hash),
            )
            .await?;

        tracing::info!(account_id = %account.id, "Password changed");
        Ok(())
    }
}
