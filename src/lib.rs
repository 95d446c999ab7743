//! # Gatehouse - Account Lifecycle Service
//!
//! Facade crate that re-exports the public APIs of the gatehouse components:
//! registration, email verification, login, password reset and profile management.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! gatehouse = { path = "../gatehouse" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Account`, `Email`, `Password`, `Role`, tokens
//! - **Ports**: `AccountStore`, `PasswordHasher`, `TokenIssuer`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `VerifyUseCase`, `LoginUseCase`, ...
//! - **Adapters**: `PostgresAccountStore`, `Argon2Hasher`, `JwtTokenIssuer`, ...
//! - **Service**: `AccountService`, the HTTP entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, error taxonomy and interceptor pipeline
pub mod core {
    pub use gatehouse_core::*;
}

pub use gatehouse_core::{
    Account, AccountError, AccountId, Claims, Email, ErrorKind, Name, Password, PublicAccount,
    Role, ValidationError,
};

// ============================================================================
// Ports
// ============================================================================

pub use gatehouse_core::{
    AccountPatch, AccountStore, AccountStoreError, EmailClient, PasswordHasher, TokenIssuer,
    UpdateGuard,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use gatehouse_application::*;
}

pub use gatehouse_application::{
    ForgotPasswordUseCase, GetProfileUseCase, LoginUseCase, RegisterUseCase,
    ResetPasswordUseCase, SeedAdminUseCase, UpdateProfileUseCase, VerifyUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Framework-agnostic handlers
    pub mod handlers {
        pub use gatehouse_adapters::handlers::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use gatehouse_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use gatehouse_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }

    /// Axum routes and middleware
    pub mod axum {
        pub use gatehouse_axum::*;
    }
}

pub use gatehouse_adapters::{
    AppState, Argon2Hasher, HashMapAccountStore, JwtConfig, JwtTokenIssuer, MockEmailClient,
    PostgresAccountStore, PostmarkEmailClient, TimedAccountStore,
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use gatehouse_service::{
    AccountService,
    bootstrap::seed_admin,
    helpers::{configure_postgresql, get_postgres_pool},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
