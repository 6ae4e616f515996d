use latchkey_core::{
    BearerToken, Email, Password, PasswordHasher, RecoveryTokenStore, TokenCodec, UserStore,
};

use super::credential_authenticator::{AuthenticatorError, CredentialAuthenticator};

/// Login use case - trades credentials for a bearer token
pub struct LoginUseCase<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>,
}

impl<'a, U, T, H, C> LoginUseCase<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    pub fn new(authenticator: &'a CredentialAuthenticator<'a, U, T, H, C>) -> Self {
        Self { authenticator }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<BearerToken, AuthenticatorError> {
        let token = self
            .authenticator
            .authenticate_by_credentials(&email, password)
            .await?;
        tracing::info!("User logged in");
        Ok(token)
    }
}
