use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    email::Email,
    password::{Password, PasswordHash},
};

/// Port trait for outbound notifications (email in production).
///
/// Delivery is fire-and-forget from the caller's point of view: callers log
/// failures and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, destination: &Email, subject: &str, body: &str) -> Result<(), String>;
}

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Port trait for one-way password hashing.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` on mismatch; errors are reserved for unusable hashes.
    async fn verify(
        &self,
        candidate: Password,
        expected: &PasswordHash,
    ) -> Result<bool, PasswordHasherError>;
}
