pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AdminSettings, AllowedOrigins, ApplicationSettings, AuthSettings, EmailClientSettings,
    JwtSettings, PasswordHashSettings, PostgresSettings, Settings, StoreSettings,
};
