use latchkey_core::{
    Email, Notifier, PasswordHasher, RecoveryTokenStore, TokenCodec, TokenPurpose, UserStore,
};

use super::account_service::{AccountError, AccountService};
use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};
use crate::notifications::{self, EMAIL_VERIFICATION_SUBJECT, LinkSettings};

#[derive(Debug, thiserror::Error)]
pub enum ResendConfirmationError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
}

/// Re-sends the email confirmation link with a refreshed token
pub struct ResendConfirmationUseCase<'a, U, T, H, C, N>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
    N: Notifier,
{
    authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
    accounts: &'a AccountService<'a, U, H>,
    notifier: &'a N,
    links: &'a LinkSettings,
}

impl<'a, U, T, H, C, N> ResendConfirmationUseCase<'a, U, T, H, C, N>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
    N: Notifier,
{
    pub fn new(
        authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
        accounts: &'a AccountService<'a, U, H>,
        notifier: &'a N,
        links: &'a LinkSettings,
    ) -> Self {
        Self {
            authenticator,
            accounts,
            notifier,
            links,
        }
    }

    #[tracing::instrument(name = "ResendConfirmationUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<(), ResendConfirmationError> {
        let user = self.accounts.get_by_email(email).await?;

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
        Ok(())
    }
}
