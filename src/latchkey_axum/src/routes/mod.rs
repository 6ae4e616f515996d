//! Axum route handlers.
//!
//! Handlers parse the request into domain types, run one application use case
//! and convert failures into [`ApiError`](crate::ApiError). Routes under
//! `auth/` are anonymous; `user/` routes take a principal extractor.

pub mod change_password;
pub mod confirm_email;
pub mod credentials;
pub mod current_user;
pub mod list_users;
pub mod login;
pub mod ping;
pub mod resend_confirmation;
pub mod send_password_reset;
pub mod signup;

pub use change_password::change_password;
pub use confirm_email::confirm_email;
pub use current_user::{UserResponse, current_user};
pub use list_users::list_users;
pub use login::login;
pub use ping::ping;
pub use resend_confirmation::resend_confirmation;
pub use send_password_reset::send_password_reset;
pub use signup::signup;
