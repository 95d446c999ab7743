use gatehouse_core::{
    AccountError, AccountPatch, AccountStore, Email, EmailClient, ResetToken, UpdateGuard,
};

use crate::notifications::{self, RESET_SUBJECT, ResetEmail};

/// Forgot password use case - issues a reset token, replacing any pending one
pub struct ForgotPasswordUseCase<'a, S, E>
where
    S: AccountStore,
    E: EmailClient,
{
    store: &'a S,
    email_client: &'a E,
}

impl<'a, S, E> ForgotPasswordUseCase<'a, S, E>
where
    S: AccountStore,
    E: EmailClient,
{
    pub fn new(store: &'a S, email_client: &'a E) -> Self {
        Self {
            store,
            email_client,
        }
    }

    #[tracing::instrument(name = "ForgotPasswordUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email) -> Result<ResetToken, AccountError> {
        let account = self.store.find_by_email(&email).await?;

        let reset_token = ResetToken::generate();
        let account = self
            .store
            .update_by_id(
                &account.id,
                UpdateGuard::None,
                AccountPatch::begin_reset(reset_token.clone()),
            )
            .await?;

        let message = ResetEmail {
            name: account.name.as_str(),
            token: reset_token.as_str(),
        };
        notifications::deliver(self.email_client, &account.email, RESET_SUBJECT, &message).await?;

        Ok(reset_token)
    }
}
