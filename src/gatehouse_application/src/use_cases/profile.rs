use gatehouse_core::{Account, AccountError, AccountPatch, AccountStore, Claims, Name, UpdateGuard};

/// Returns the account behind an authenticated request
pub struct GetProfileUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> GetProfileUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "GetProfileUseCase::execute", skip_all, fields(account_id = %claims.sub))]
    pub async fn execute(&self, claims: &Claims) -> Result<Account, AccountError> {
        Ok(self.store.find_by_id(&claims.sub).await?)
    }
}

/// Changes the display name of the authenticated account
pub struct UpdateProfileUseCase<'a, S>
where
    S: AccountStore,
{
    store: &'a S,
}

impl<'a, S> UpdateProfileUseCase<'a, S>
where
    S: AccountStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "UpdateProfileUseCase::execute", skip_all, fields(account_id = %claims.sub))]
    pub async fn execute(&self, claims: &Claims, name: Name) -> Result<Account, AccountError> {
        Ok(self
            .store
            .update_by_id(&claims.sub, UpdateGuard::None, AccountPatch::rename(name))
            .await?)
    }
}
