//! The latchkey HTTP service: router assembly, request tracing and start-up
//! helpers shared by the binary and the API tests.

pub mod auth_service;
pub mod helpers;
pub mod telemetry;

pub use auth_service::AuthService;
