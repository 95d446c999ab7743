pub mod account_service;
pub mod bootstrap;
pub mod helpers;
pub mod telemetry;

pub use account_service::AccountService;
