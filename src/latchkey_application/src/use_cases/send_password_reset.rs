use latchkey_core::{
    Email, Notifier, PasswordHasher, RecoveryTokenStore, TokenCodec, TokenPurpose, UserStore,
};

use super::account_service::{AccountError, AccountService};
use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};
use crate::notifications::{self, PASSWORD_RESET_SUBJECT};

#[derive(Debug, thiserror::Error)]
pub enum SendPasswordResetError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
}

/// Mails a password reset token to a known user
pub struct SendPasswordResetUseCase<'a, U, T, H, C, N>
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
}

impl<'a, U, T, H, C, N> SendPasswordResetUseCase<'a, U, T, H, C, N>
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
    ) -> Self {
        Self {
            authenticator,
            accounts,
            notifier,
        }
    }

    #[tracing::instrument(name = "SendPasswordResetUseCase::execute", skip(self))]
    pub async fn execute(&self, email: &Email) -> Result<(), SendPasswordResetError> {
        let user = self.accounts.get_by_email(email).await?;

        let token = self
            .authenticator
            .issue_recovery_token(&user, TokenPurpose::PasswordReset)
            .await?;

        notifications::deliver(
            self.notifier,
            user.email(),
            PASSWORD_RESET_SUBJECT,
            notifications::password_reset_body(&token),
        )
        .await;
        Ok(())
    }
}
