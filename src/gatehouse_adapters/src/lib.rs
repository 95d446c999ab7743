pub mod authentication;
pub mod config;
pub mod email;
pub mod handlers;
pub mod hashing;
pub mod persistence;

pub use authentication::{JwtConfig, JwtTokenIssuer};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use handlers::AppState;
pub use hashing::Argon2Hasher;
pub use persistence::{HashMapAccountStore, PostgresAccountStore, TimedAccountStore};
