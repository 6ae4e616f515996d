use chrono::Utc;
use latchkey_core::{
    RecoveryToken, RecoveryTokenStore, RecoveryTokenStoreError, RecoveryTokenValue, TokenPurpose,
    UserId,
};

#[derive(Debug, thiserror::Error)]
pub enum RecoveryTokenError {
    #[error("Recovery token not found")]
    TokenNotFound,
    #[error("Recovery token expired")]
    TokenExpired,
    #[error("Recovery token store error: {0}")]
    StoreError(#[from] RecoveryTokenStoreError),
}

/// Lifecycle of the single-use recovery tokens.
///
/// Per (user, purpose) a token is either absent or active. Issuing while one
/// is active refreshes it in place; consuming deletes it.
pub struct RecoveryTokenManager<'a, T>
where
    T: RecoveryTokenStore,
{
    token_store: &'a T,
}

impl<'a, T> RecoveryTokenManager<'a, T>
where
    T: RecoveryTokenStore,
{
    pub fn new(token_store: &'a T) -> Self {
        Self { token_store }
    }

    /// Create a token for the user, or give the existing one a new value and
    /// a fresh expiry. Returns the value to hand to the user.
    #[tracing::instrument(name = "RecoveryTokenManager::issue_or_refresh", skip(self))]
    pub async fn issue_or_refresh(
        &self,
        user_id: &UserId,
        purpose: TokenPurpose,
    ) -> Result<RecoveryTokenValue, RecoveryTokenError> {
        let now = Utc::now();
        let token = match self.token_store.find_by_user(purpose, user_id).await? {
            Some(mut existing) => {
                existing.refresh(now);
                existing
            }
            None => RecoveryToken::issue(*user_id, purpose, now),
        };

        let saved = self.token_store.save_token(token).await?;
        tracing::debug!(token_id = %saved.id(), "Recovery token stored");
        Ok(saved.value().clone())
    }

    /// Look up an active token. Has no side effects.
    #[tracing::instrument(name = "RecoveryTokenManager::validate", skip(self, value))]
    pub async fn validate(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<RecoveryToken, RecoveryTokenError> {
        let token = self
            .token_store
            .find_by_value(purpose, value)
            .await?
            .ok_or(RecoveryTokenError::TokenNotFound)?;

        if token.is_expired_at(Utc::now()) {
            return Err(RecoveryTokenError::TokenExpired);
        }
        Ok(token)
    }

    /// Delete a token once the mutation it gated has been applied.
    #[tracing::instrument(name = "RecoveryTokenManager::consume", skip_all, fields(token_id = %token.id()))]
    pub async fn consume(&self, token: &RecoveryToken) -> Result<(), RecoveryTokenError> {
        self.token_store
            .delete_token(token.purpose(), token.id())
            .await?;
        Ok(())
    }
}
