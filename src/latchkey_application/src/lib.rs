pub mod notifications;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use notifications::LinkSettings;

pub use use_cases::{
    account_service::{AccountError, AccountService},
    confirm_email::{ConfirmEmailError, ConfirmEmailUseCase},
    credential_authenticator::{AuthenticatorError, CredentialAuthenticator, DUMMY_PHC},
    login::LoginUseCase,
    recovery_token_manager::{RecoveryTokenError, RecoveryTokenManager},
    resend_confirmation::{ResendConfirmationError, ResendConfirmationUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    send_password_reset::{SendPasswordResetError, SendPasswordResetUseCase},
    signup::{SignupError, SignupUseCase},
};
