use color_eyre::eyre::Result;
use gatehouse_adapters::{
    AppState, HashMapAccountStore, JwtTokenIssuer, PostgresAccountStore, PostmarkEmailClient,
    TimedAccountStore, config::Settings,
};
use gatehouse_core::{AccountStore, Email};
use gatehouse_service::{
    AccountService, bootstrap::seed_admin, helpers::configure_postgresql, telemetry::init_tracing,
};
use reqwest::Client as HttpClient;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;

    match settings.postgres.clone() {
        Some(postgres) => {
            let pg_pool = configure_postgresql(&postgres).await?;
            run(PostgresAccountStore::new(pg_pool), settings).await
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            run(HashMapAccountStore::new(), settings).await
        }
    }
}

async fn run<S>(store: S, settings: Settings) -> Result<()>
where
    S: AccountStore + Clone + 'static,
{
    let store = TimedAccountStore::new(store, settings.store.timeout());
    let hasher = settings.auth.password_hash.hasher()?;
    let issuer = JwtTokenIssuer::new(settings.auth.jwt.to_config());

    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        &settings.email_client.base_url,
        &settings.email_client.sender_name,
        Email::parse(settings.email_client.sender.clone())?,
        settings.email_client.auth_token.clone(),
        http_client,
    )?;

    if let Some(admin) = &settings.auth.admin {
        seed_admin(&store, &hasher, admin).await?;
    }

    if settings.application.expose_tokens {
        tracing::warn!("Verification and reset tokens are echoed in responses");
    }

    let state = AppState::new(store, hasher, issuer, email_client)
        .with_exposed_tokens(settings.application.expose_tokens);

    let account_service = AccountService::new(
        state,
        &settings.application.assets_dir,
        settings.application.body_limit_bytes,
    );

    let listener = TcpListener::bind(&settings.application.address).await?;

    account_service
        .run_standalone(listener, Some(settings.auth.allowed_origins.clone()))
        .await?;

    Ok(())
}
