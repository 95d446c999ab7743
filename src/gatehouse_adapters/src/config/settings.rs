//! Service settings.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults,
//! 2. the settings file named by `GATEHOUSE_CONFIG_FILE`, only when that variable is set
//!    (`config/local.json` holds development values),
//! 3. environment variables such as `GATEHOUSE__POSTGRES__URL`.
//!
//! `dotenvy` loads a `.env` file into the environment first, if one exists.

use std::time::Duration;

use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use gatehouse_core::HashError;
use secrecy::Secret;
use serde::Deserialize;

use crate::{
    authentication::JwtConfig,
    config::constants::{CONFIG_FILE_VAR, env, prod},
    hashing::Argon2Hasher,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    pub store: StoreSettings,
    pub email_client: EmailClientSettings,
    /// Accounts are kept in memory when no database is configured.
    #[serde(default)]
    pub postgres: Option<PostgresSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
    pub assets_dir: String,
    pub body_limit_bytes: usize,
    /// Echo verification and reset tokens in responses. Development only.
    pub expose_tokens: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    pub password_hash: PasswordHashSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
    #[serde(default)]
    pub admin: Option<AdminSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub time_to_live: i64,
}

impl JwtSettings {
    pub fn to_config(&self) -> JwtConfig {
        JwtConfig {
            jwt_secret: self.secret.clone(),
            token_ttl_in_seconds: self.time_to_live,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PasswordHashSettings {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl PasswordHashSettings {
    pub fn hasher(&self) -> Result<Argon2Hasher, HashError> {
        Argon2Hasher::new(self.memory_kib, self.iterations, self.parallelism)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminSettings {
    pub name: String,
    pub email: String,
    pub password: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub timeout_in_millis: u64,
}

impl StoreSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_name: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Origins allowed to make cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(origins.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Settings {
    /// Loads settings from defaults, the settings file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_sources(std::env::var(CONFIG_FILE_VAR).ok().as_deref())
    }

    fn from_sources(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder()?;
        if let Some(path) = config_file {
            builder = builder.add_source(File::with_name(path));
        }

        builder
            .add_source(
                Environment::with_prefix(env::PREFIX)
                    .prefix_separator(env::SEPARATOR)
                    .separator(env::SEPARATOR)
                    .list_separator(env::LIST_SEPARATOR)
                    .with_list_parse_key("auth.allowed_origins")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// A builder preloaded with the built-in defaults.
    ///
    /// `auth.jwt.secret` and `email_client.auth_token` have no default and must come from a
    /// later source.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("application.assets_dir", prod::ASSETS_DIR)?
            .set_default("application.body_limit_bytes", prod::BODY_LIMIT_BYTES)?
            .set_default("application.expose_tokens", false)?
            .set_default("auth.jwt.time_to_live", prod::TOKEN_TTL_SECONDS)?
            .set_default(
                "auth.password_hash.memory_kib",
                prod::password_hash::MEMORY_KIB,
            )?
            .set_default(
                "auth.password_hash.iterations",
                prod::password_hash::ITERATIONS,
            )?
            .set_default(
                "auth.password_hash.parallelism",
                prod::password_hash::PARALLELISM,
            )?
            .set_default("store.timeout_in_millis", prod::STORE_TIMEOUT_MILLIS)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender_name", prod::email_client::SENDER_NAME)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_in_millis",
                prod::email_client::TIMEOUT_MILLIS,
            )
    }
}
