//! Axum integration for latchkey.
//!
//! Wires the framework-agnostic pieces from `latchkey_core`,
//! `latchkey_application` and `latchkey_adapters` into axum.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  latchkey_core: HTTP trait definitions   │
//! │  latchkey_adapters: BearerFilter         │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  latchkey_axum                           │
//! │  - AxumRequest / AxumResponseBuilder     │
//! │  - bearer middleware                     │
//! │  - principal extractors                  │
//! │  - route handlers and ApiError           │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use axum::{Router, middleware, routing::get};
//! use latchkey_axum::{authenticate, routes};
//!
//! let app = Router::new()
//!     .route("/user/current-user", get(routes::current_user::<U, T, N>))
//!     .with_state(state)
//!     .layer(middleware::from_fn_with_state(filter, authenticate::<JwtTokenCodec>));
//! ```

pub mod adapters;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

pub use adapters::{AxumRequest, AxumResponseBuilder, response_builder};
pub use error::{ApiError, ErrorResponse};
pub use extractors::{AdminPrincipal, CurrentPrincipal};
pub use middleware::authenticate;
pub use state::AppState;
