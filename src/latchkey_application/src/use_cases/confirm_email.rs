use latchkey_core::{
    PasswordHasher, RecoveryTokenStore, RecoveryTokenValue, TokenCodec, TokenPurpose, UserStore,
};

use super::account_service::{AccountError, AccountService};
use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};

#[derive(Debug, thiserror::Error)]
pub enum ConfirmEmailError {
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Confirm email use case - enables the account behind a verification token
pub struct ConfirmEmailUseCase<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
    accounts: &'a AccountService<'a, U, H>,
}

impl<'a, U, T, H, C> ConfirmEmailUseCase<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    pub fn new(
        authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
        accounts: &'a AccountService<'a, U, H>,
    ) -> Self {
        Self {
            authenticator,
            accounts,
        }
    }

    /// The token is only consumed after the account was enabled, so a failed
    /// write leaves it usable for a retry.
    #[tracing::instrument(name = "ConfirmEmailUseCase::execute", skip_all)]
    pub async fn execute(&self, value: &RecoveryTokenValue) -> Result<(), ConfirmEmailError> {
        let token = self
            .authenticator
            .validate_recovery_token(TokenPurpose::EmailVerification, value)
            .await?;

        self.accounts.enable_user(token.user_id()).await?;
        self.authenticator.consume_recovery_token(&token).await?;

        tracing::info!(user_id = %token.user_id(), "Email verified");
        Ok(())
    }
}
