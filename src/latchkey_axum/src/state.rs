use std::sync::Arc;

use latchkey_adapters::{Argon2PasswordHasher, JwtTokenCodec};
use latchkey_application::{AccountService, CredentialAuthenticator, LinkSettings};
use latchkey_core::{Notifier, RecoveryTokenStore, UserStore};

/// Everything the route handlers need, shared across requests.
///
/// Stores are expected to be cheap to clone (`Arc` or pool inside); the
/// notifier and link settings are shared behind an `Arc`.
pub struct AppState<U, T, N> {
    pub user_store: U,
    pub token_store: T,
    pub notifier: Arc<N>,
    pub hasher: Argon2PasswordHasher,
    pub codec: JwtTokenCodec,
    pub links: Arc<LinkSettings>,
}

impl<U, T, N> AppState<U, T, N>
where
    U: UserStore,
    T: RecoveryTokenStore,
    N: Notifier,
{
    pub fn new(
        user_store: U,
        token_store: T,
        notifier: N,
        codec: JwtTokenCodec,
        links: LinkSettings,
    ) -> Self {
        Self {
            user_store,
            token_store,
            notifier: Arc::new(notifier),
            hasher: Argon2PasswordHasher,
            codec,
            links: Arc::new(links),
        }
    }

    pub fn authenticator(
        &self,
    ) -> CredentialAuthenticator<'_, U, T, Argon2PasswordHasher, JwtTokenCodec> {
        CredentialAuthenticator::new(
            &self.user_store,
            &self.token_store,
            &self.hasher,
            &self.codec,
        )
    }

    pub fn accounts(&self) -> AccountService<'_, U, Argon2PasswordHasher> {
        AccountService::new(&self.user_store, &self.hasher)
    }
}

impl<U, T, N> Clone for AppState<U, T, N>
where
    U: Clone,
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            user_store: self.user_store.clone(),
            token_store: self.token_store.clone(),
            notifier: Arc::clone(&self.notifier),
            hasher: self.hasher,
            codec: self.codec.clone(),
            links: Arc::clone(&self.links),
        }
    }
}
