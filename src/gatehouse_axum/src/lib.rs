//! Axum integration for the gatehouse account service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_core: ResponseBuilder,        │
//! │                  Pipeline                │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_axum:                         │
//! │  - AxumResponseBuilder                   │
//! │  - pipeline middleware                   │
//! │  - Axum route handlers                   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, middleware, routing::post};
//! use gatehouse_axum::{PipelineState, intercept, routes};
//!
//! let app = Router::new()
//!     .route("/login", post(routes::login::<S, H, T, E>))
//!     .route_layer(middleware::from_fn_with_state(
//!         PipelineState::new(Pipeline::new().then(TrimStrings), body_limit),
//!         intercept,
//!     ))
//!     .with_state(app_state);
//! ```

pub mod adapters;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;

pub use adapters::{AxumResponseBuilder, inbound_request, response_builder};
pub use error::RouteError;
pub use extract::ValidJson;
pub use middleware::{PipelineState, intercept};
