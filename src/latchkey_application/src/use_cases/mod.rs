pub mod account_service;
pub mod confirm_email;
pub mod credential_authenticator;
pub mod login;
pub mod recovery_token_manager;
pub mod resend_confirmation;
pub mod reset_password;
pub mod send_password_reset;
pub mod signup;
