pub mod domain;
pub mod error;
pub mod http_abstraction;
pub mod pipeline;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    account::{Account, PublicAccount},
    account_id::AccountId,
    claims::Claims,
    email::Email,
    name::Name,
    password::Password,
    password_hash::PasswordHash,
    role::Role,
    tokens::{BearerToken, ResetToken, VerificationToken},
};

pub use error::{AccountError, ErrorKind, ValidationError};

pub use ports::{
    repositories::{AccountPatch, AccountStore, AccountStoreError, UpdateGuard},
    services::{EmailClient, HashError, PasswordHasher, TokenError, TokenIssuer},
};

pub use http_abstraction::{RequestHeaders, ResponseBuilder, ResponseHelpers};
pub use pipeline::{
    InboundRequest, Interceptor, Pipeline, RequestContext, RequireBearer, RequireRole, TrimStrings,
};
