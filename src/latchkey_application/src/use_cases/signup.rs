use latchkey_core::{
    Email, Notifier, Password, PasswordHasher, RecoveryTokenStore, TokenCodec, TokenPurpose, User,
    UserStore,
};

use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};
use crate::notifications::{self, EMAIL_VERIFICATION_SUBJECT, LinkSettings};

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
}

/// Signup use case - registers a disabled account and mails a confirmation link
pub struct SignupUseCase<'a, U, T, H, C, N>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
    N: Notifier,
{
    authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
    notifier: &'a N,
    links: &'a LinkSettings,
}

impl<'a, U, T, H, C, N> SignupUseCase<'a, U, T, H, C, N>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
    N: Notifier,
{
    pub fn new(
        authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
        notifier: &'a N,
        links: &'a LinkSettings,
    ) -> Self {
        Self {
            authenticator,
            notifier,
            links,
        }
    }

    /// Execute the signup use case
    ///
    /// # Returns
    /// The stored user. It stays disabled until the emailed link is followed.
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, SignupError> {
        let user = self.authenticator.register_new_user(email, password).await?;

        let token = self
            .authenticator
            .issue_recovery_token(&user, TokenPurpose::EmailVerification)
            .await?;

        notifications::deliver(
            self.notifier,
            user.email(),
            EMAIL_VERIFICATION_SUBJECT,
            notifications::email_verification_body(self.links, &token),
        )
        .await;

        tracing::info!(user_id = %user.id(), "User registered");
        Ok(user)
    }
}
