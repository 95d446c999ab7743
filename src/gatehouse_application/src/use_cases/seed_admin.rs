use gatehouse_core::{
    Account, AccountError, AccountStore, AccountStoreError, Email, Name, Password, PasswordHasher,
    Role,
};

#[derive(Debug, Clone)]
pub enum SeedOutcome {
    Created(Account),
    AlreadyPresent,
}

/// Creates the configured administrator unless its email is already registered
pub struct SeedAdminUseCase<'a, S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    store: &'a S,
    hasher: &'a H,
}

impl<'a, S, H> SeedAdminUseCase<'a, S, H>
where
    S: AccountStore,
    H: PasswordHasher,
{
    pub fn new(store: &'a S, hasher: &'a H) -> Self {
        Self { store, hasher }
    }

    #[tracing::instrument(name = "SeedAdminUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: Name,
        email: Email,
        password: Password,
    ) -> Result<SeedOutcome, AccountError> {
        match self.store.find_by_email(&email).await {
            Ok(_) => return Ok(SeedOutcome::AlreadyPresent),
            Err(AccountStoreError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hasher.hash(&password).await?;
        let admin = Account::preverified(name, email, password_hash, Role::Admin);

        match self.store.insert(admin).await {
            Ok(account) => {
                tracing::info!(account_id = %account.id, "Admin account seeded");
                Ok(SeedOutcome::Created(account))
            }
            // Lost a race with another instance seeding the same address.
            Err(AccountStoreError::EmailAlreadyExists) => Ok(SeedOutcome::AlreadyPresent),
            Err(e) => Err(e.into()),
        }
    }
}
