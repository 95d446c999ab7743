use gatehouse_adapters::config::AdminSettings;
use gatehouse_application::{SeedAdminUseCase, SeedOutcome};
use gatehouse_core::{AccountError, AccountStore, Email, Name, Password, PasswordHasher};

/// Makes sure the configured administrator exists. Safe to run on every start.
pub async fn seed_admin<S, H>(
    store: &S,
    hasher: &H,
    admin: &AdminSettings,
) -> Result<SeedOutcome, AccountError>
where
    S: AccountStore,
    H: PasswordHasher,
{
    let name = Name::parse(admin.name.clone())?;
    let email = Email::parse(admin.email.clone())?;
    let password = Password::parse(admin.password.clone())?;

    let outcome = SeedAdminUseCase::new(store, hasher)
        .execute(name, email, password)
        .await?;

    if let SeedOutcome::AlreadyPresent = outcome {
        tracing::info!(email = %admin.email, "Admin account already present");
    }

    Ok(outcome)
}
