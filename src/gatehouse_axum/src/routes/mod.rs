//! Axum-specific route handlers.
//!
//! These routes use Axum's extractors to get data from requests, call the
//! framework-agnostic handlers in `gatehouse_adapters`, and convert errors into
//! responses through [`RouteError`](crate::RouteError).

pub mod forgot_password;
pub mod login;
pub mod profile;
pub mod register;
pub mod reset_password;
pub mod verify;

pub use forgot_password::forgot_password;
pub use login::login;
pub use profile::{get_profile, update_profile};
pub use register::register;
pub use reset_password::reset_password;
pub use verify::verify;
