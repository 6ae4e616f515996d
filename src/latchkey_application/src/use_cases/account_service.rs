use latchkey_core::{
    Email, Page, PageRequest, Password, PasswordHasher, PasswordHasherError, User, UserId,
    UserStore, UserStoreError,
};
use secrecy::ExposeSecret;

use super::credential_authenticator::hash_and_replace;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Password hasher error: {0}")]
    HasherError(#[from] PasswordHasherError),
}

/// Account lookups and state changes that don't involve credentials.
pub struct AccountService<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: &'a U,
    hasher: &'a H,
}

impl<'a, U, H> AccountService<'a, U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: &'a U, hasher: &'a H) -> Self {
        Self { user_store, hasher }
    }

    /// Enabling an enabled account writes nothing.
    #[tracing::instrument(name = "AccountService::enable_user", skip(self))]
    pub async fn enable_user(&self, user_id: &UserId) -> Result<(), AccountError> {
        let mut user = self.get_by_id(user_id).await?;
        if user.enable() {
            self.user_store.save_user(user).await?;
            tracing::info!("User account enabled");
        }
        Ok(())
    }

    #[tracing::instrument(name = "AccountService::update_password", skip(self, new_password))]
    pub async fn update_password(
        &self,
        user_id: &UserId,
        new_password: Password,
    ) -> Result<User, AccountError> {
        let user = self.get_by_id(user_id).await?;
        hash_and_replace(self.user_store, self.hasher, user, new_password).await
    }

    #[tracing::instrument(name = "AccountService::get_by_email", skip(self))]
    pub async fn get_by_email(&self, email: &Email) -> Result<User, AccountError> {
        self.user_store.find_by_email(email).await?.ok_or_else(|| {
            AccountError::ResourceNotFound(format!(
                "User not found with email: {}",
                email.as_ref().expose_secret()
            ))
        })
    }

    pub async fn get_by_id(&self, user_id: &UserId) -> Result<User, AccountError> {
        self.user_store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AccountError::ResourceNotFound(format!("User not found with id: {user_id}")))
    }

    pub async fn exists_with_email(&self, email: &Email) -> Result<bool, AccountError> {
        Ok(self.user_store.exists_by_email(email).await?)
    }

    #[tracing::instrument(name = "AccountService::list_users", skip(self))]
    pub async fn list_users(&self, page: PageRequest) -> Result<Page<User>, AccountError> {
        Ok(self.user_store.list_users(page).await?)
    }
}
