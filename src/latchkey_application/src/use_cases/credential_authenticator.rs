use std::sync::LazyLock;

use latchkey_core::{
    BearerToken, Email, Password, PasswordHash, PasswordHasher, PasswordHasherError,
    RecoveryToken, RecoveryTokenStore, RecoveryTokenValue, TokenCodec, TokenCodecError,
    TokenPurpose, User, UserStore, UserStoreError,
};
use secrecy::Secret;

use super::recovery_token_manager::{RecoveryTokenError, RecoveryTokenManager};

#[derive(Debug, thiserror::Error)]
pub enum AuthenticatorError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User with same email is already exists.")]
    DuplicateIdentity,
    #[error("User account is not enabled")]
    AccountDisabled,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    HasherError(#[from] PasswordHasherError),
    #[error("Token codec error: {0}")]
    TokenCodecError(#[from] TokenCodecError),
    #[error(transparent)]
    RecoveryToken(#[from] RecoveryTokenError),
}

/// Argon2id PHC string with the production work factors. Unknown emails are
/// verified against it so every failed login costs one hash check.
pub const DUMMY_PHC: &str = "$argon2id$v=19$m=15000,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

static DUMMY_HASH: LazyLock<PasswordHash> =
    LazyLock::new(|| PasswordHash::new(Secret::new(DUMMY_PHC.to_owned())));

/// Hash `new_password`, store it on `user` and persist the user.
pub(crate) async fn hash_and_replace<U, H, E>(
    user_store: &U,
    hasher: &H,
    mut user: User,
    new_password: Password,
) -> Result<User, E>
where
    U: UserStore,
    H: PasswordHasher,
    E: From<UserStoreError> + From<PasswordHasherError>,
{
    let password_hash = hasher.hash(new_password).await?;
    user.replace_password_hash(password_hash);
    Ok(user_store.save_user(user).await?)
}

/// Verifies secrets, registers users and issues credentials.
pub struct CredentialAuthenticator<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    user_store: &'a U,
    token_store: &'a T,
    hasher: &'a H,
    codec: &'a C,
}

impl<'a, U, T, H, C> CredentialAuthenticator<'a, U, T, H, C>
where
    U: UserStore,
    T: RecoveryTokenStore,
    H: PasswordHasher,
    C: TokenCodec,
{
    pub fn new(user_store: &'a U, token_store: &'a T, hasher: &'a H, codec: &'a C) -> Self {
        Self {
            user_store,
            token_store,
            hasher,
            codec,
        }
    }

    /// Exchange an email and password for a bearer credential.
    ///
    /// An unknown email and a wrong password fail identically. A disabled
    /// account is only reported once the password has been verified.
    #[tracing::instrument(
        name = "CredentialAuthenticator::authenticate_by_credentials",
        skip(self, password)
    )]
    pub async fn authenticate_by_credentials(
        &self,
        email: &Email,
        password: Password,
    ) -> Result<BearerToken, AuthenticatorError> {
        let Some(user) = self.user_store.find_by_email(email).await? else {
            let _ = self.hasher.verify(password, &DUMMY_HASH).await;
            return Err(AuthenticatorError::InvalidCredentials);
        };

        if !self.hasher.verify(password, user.password_hash()).await? {
            return Err(AuthenticatorError::InvalidCredentials);
        }
        if !user.is_enabled() {
            return Err(AuthenticatorError::AccountDisabled);
        }

        Ok(self.codec.issue(user.email(), user.roles())?)
    }

    /// Create a disabled account holding only the default role.
    #[tracing::instrument(
        name = "CredentialAuthenticator::register_new_user",
        skip(self, password)
    )]
    pub async fn register_new_user(
        &self,
        email: Email,
        password: Password,
    ) -> Result<User, AuthenticatorError> {
        if self.user_store.exists_by_email(&email).await? {
            return Err(AuthenticatorError::DuplicateIdentity);
        }

        let password_hash = self.hasher.hash(password).await?;
        let user = User::register(email, password_hash);

        match self.user_store.save_user(user).await {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent signup for the same email.
            Err(UserStoreError::UserAlreadyExists) => Err(AuthenticatorError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(
        name = "CredentialAuthenticator::change_password",
        skip_all,
        fields(user_id = %user.id())
    )]
    pub async fn change_password(
        &self,
        user: User,
        new_password: Password,
    ) -> Result<User, AuthenticatorError> {
        hash_and_replace(self.user_store, self.hasher, user, new_password).await
    }

    pub async fn issue_recovery_token(
        &self,
        user: &User,
        purpose: TokenPurpose,
    ) -> Result<RecoveryTokenValue, AuthenticatorError> {
        Ok(RecoveryTokenManager::new(self.token_store)
            .issue_or_refresh(user.id(), purpose)
            .await?)
    }

    pub async fn validate_recovery_token(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<RecoveryToken, AuthenticatorError> {
        Ok(RecoveryTokenManager::new(self.token_store)
            .validate(purpose, value)
            .await?)
    }

    pub async fn consume_recovery_token(
        &self,
        token: &RecoveryToken,
    ) -> Result<(), AuthenticatorError> {
        Ok(RecoveryTokenManager::new(self.token_store)
            .consume(token)
            .await?)
    }
}
