use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    page::{Page, PageRequest},
    recovery_token::{RecoveryToken, RecoveryTokenId, RecoveryTokenValue, TokenPurpose},
    user::{User, UserId},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError>;
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError>;
    /// Insert or update by id. Fails with `UserAlreadyExists` when another
    /// user already owns the email.
    async fn save_user(&self, user: User) -> Result<User, UserStoreError>;
    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserStoreError>;
}

// RecoveryTokenStore port trait and errors
#[derive(Debug, Error)]
pub enum RecoveryTokenStoreError {
    #[error("A recovery token of this purpose already exists for the user")]
    DuplicateToken,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for RecoveryTokenStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::DuplicateToken, Self::DuplicateToken)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait RecoveryTokenStore: Send + Sync {
    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError>;

    async fn find_by_user(
        &self,
        purpose: TokenPurpose,
        user_id: &UserId,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError>;

    /// Insert or update by id.
    async fn save_token(
        &self,
        token: RecoveryToken,
    ) -> Result<RecoveryToken, RecoveryTokenStoreError>;

    /// Deleting an id that is already gone is not an error.
    async fn delete_token(
        &self,
        purpose: TokenPurpose,
        id: &RecoveryTokenId,
    ) -> Result<(), RecoveryTokenStoreError>;
}
