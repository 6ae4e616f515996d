use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use latchkey_core::{
    RecoveryToken, RecoveryTokenId, RecoveryTokenStore, RecoveryTokenStoreError,
    RecoveryTokenValue, TokenPurpose, UserId,
};

#[derive(Default, Clone)]
pub struct HashMapRecoveryTokenStore {
    tokens: Arc<RwLock<HashMap<RecoveryTokenId, RecoveryToken>>>,
}

impl HashMapRecoveryTokenStore {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl RecoveryTokenStore for HashMapRecoveryTokenStore {
    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|token| token.purpose() == purpose && token.value() == value)
            .cloned())
    }

    async fn find_by_user(
        &self,
        purpose: TokenPurpose,
        user_id: &UserId,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|token| token.purpose() == purpose && token.user_id() == user_id)
            .cloned())
    }

    async fn save_token(
        &self,
        token: RecoveryToken,
    ) -> Result<RecoveryToken, RecoveryTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        let duplicate = tokens.values().any(|existing| {
            existing.purpose() == token.purpose()
                && existing.user_id() == token.user_id()
                && existing.id() != token.id()
        });
        if duplicate {
            return Err(RecoveryTokenStoreError::DuplicateToken);
        }
        tokens.insert(*token.id(), token.clone());
        Ok(token)
    }

    async fn delete_token(
        &self,
        purpose: TokenPurpose,
        id: &RecoveryTokenId,
    ) -> Result<(), RecoveryTokenStoreError> {
        let mut tokens = self.tokens.write().await;
        if tokens.get(id).is_some_and(|token| token.purpose() == purpose) {
            tokens.remove(id);
        }
        Ok(())
    }
}
