use latchkey_core::{
    Password, PasswordHasher, RecoveryTokenStore, RecoveryTokenValue, TokenCodec, TokenPurpose,
    UserStore,
};

use super::account_service::{AccountError, AccountService};
use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};

#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error(transparent)]
    Authenticator(#[from] AuthenticatorError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Change password use case - sets a new password against a reset token
pub struct ResetPasswordUseCase<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
    accounts: &'a AccountService<'a, U, H>,
}

impl<'a, U, T, H, C> ResetPasswordUseCase<'a, U, T, H, C>
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

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        value: &RecoveryTokenValue,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let token = self
            .authenticator
            .validate_recovery_token(TokenPurpose::PasswordReset, value)
            .await?;

        self.accounts
            .update_password(token.user_id(), new_password)
            .await?;
        self.authenticator.consume_recovery_token(&token).await?;

        tracing::info!(user_id = %token.user_id(), "Password reset");
        Ok(())
    }
}
