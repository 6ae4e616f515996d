//! In-memory doubles shared by the use case tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use latchkey_core::{
    BearerToken, CredentialError, Email, Notifier, Page, PageRequest, Password, PasswordHash,
    PasswordHasher, PasswordHasherError, Principal, RecoveryToken, RecoveryTokenId,
    RecoveryTokenStore, RecoveryTokenStoreError, RecoveryTokenValue, Role, TokenCodec,
    TokenCodecError, TokenPurpose, User, UserId, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    saves: Arc<AtomicUsize>,
}

impl MockUserStore {
    /// Seed a user without counting it as a write.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(*user.id(), user);
    }

    pub async fn get(&self, id: &UserId) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email() == email))
    }

    async fn save_user(&self, user: User) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email() == user.email() && u.id() != user.id())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(*user.id(), user.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(user)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at());
        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .collect();
        Ok(Page::new(content, page, total))
    }
}

#[derive(Clone, Default)]
pub struct MockTokenStore {
    tokens: Arc<RwLock<HashMap<RecoveryTokenId, RecoveryToken>>>,
    saves: Arc<AtomicUsize>,
}

impl MockTokenStore {
    pub async fn insert(&self, token: RecoveryToken) {
        self.tokens.write().await.insert(*token.id(), token);
    }

    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    pub async fn all(&self) -> Vec<RecoveryToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecoveryTokenStore for MockTokenStore {
    async fn find_by_value(
        &self,
        purpose: TokenPurpose,
        value: &RecoveryTokenValue,
    ) -> Result<Option<RecoveryToken>, RecoveryTokenStoreError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.purpose() == purpose && t.value() == value)
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
            .find(|t| t.purpose() == purpose && t.user_id() == user_id)
            .cloned())
    }

    async fn save_token(
        &self,
        token: RecoveryToken,
    ) -> Result<RecoveryToken, RecoveryTokenStoreError> {
        self.tokens.write().await.insert(*token.id(), token.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(token)
    }

    async fn delete_token(
        &self,
        _purpose: TokenPurpose,
        id: &RecoveryTokenId,
    ) -> Result<(), RecoveryTokenStoreError> {
        self.tokens.write().await.remove(id);
        Ok(())
    }
}

/// Reversible "hash" so tests can inspect what was stored.
#[derive(Clone, Default)]
pub struct MockHasher {
    verifies: Arc<AtomicUsize>,
}

impl MockHasher {
    pub fn verify_count(&self) -> usize {
        self.verifies.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PasswordHasher for MockHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, PasswordHasherError> {
        Ok(PasswordHash::new(Secret::new(format!(
            "hashed:{}",
            password.as_ref().expose_secret()
        ))))
    }

    async fn verify(
        &self,
        candidate: Password,
        expected: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        let stored = expected
            .as_ref()
            .expose_secret()
            .strip_prefix("hashed:")
            .ok_or_else(|| PasswordHasherError::MalformedHash("missing prefix".to_string()))?;
        Ok(stored == candidate.as_ref().expose_secret())
    }
}

/// Unsigned `email|ROLE,ROLE` tokens.
#[derive(Clone, Default)]
pub struct MockCodec;

impl TokenCodec for MockCodec {
    fn issue(&self, email: &Email, roles: &BTreeSet<Role>) -> Result<BearerToken, TokenCodecError> {
        let roles: Vec<&str> = roles.iter().map(Role::as_str).collect();
        Ok(BearerToken::from(format!(
            "{}|{}",
            email.as_ref().expose_secret(),
            roles.join(",")
        )))
    }

    fn parse(&self, token: &str) -> Result<Principal, CredentialError> {
        let (email, roles) = token
            .split_once('|')
            .ok_or(CredentialError::MalformedCredential)?;
        let email = Email::try_from(email).map_err(|_| CredentialError::MalformedCredential)?;
        let roles = roles
            .split(',')
            .map(str::parse)
            .collect::<Result<BTreeSet<Role>, _>>()
            .map_err(|_| CredentialError::MalformedCredential)?;
        Ok(Principal::new(email, roles))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub destination: String,
    pub subject: String,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<SentMessage>>>,
    failing: bool,
}

impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            sent: Arc::default(),
            failing: true,
        }
    }

    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, destination: &Email, subject: &str, body: &str) -> Result<(), String> {
        if self.failing {
            return Err("smtp unavailable".to_string());
        }
        self.sent.write().await.push(SentMessage {
            destination: destination.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub fn email(raw: &str) -> Email {
    Email::try_from(raw).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(raw).unwrap()
}

/// A user whose stored hash matches `raw_password` under [`MockHasher`].
pub fn user_with_password(raw_email: &str, raw_password: &str, enabled: bool) -> User {
    let mut user = User::register(
        email(raw_email),
        PasswordHash::new(Secret::new(format!("hashed:{raw_password}"))),
    );
    if enabled {
        user.enable();
    }
    user
}

pub fn link_settings() -> crate::LinkSettings {
    crate::LinkSettings {
        server_host: "http://localhost:3000".to_string(),
        api_prefix: "/api/v1".to_string(),
    }
}

/// Every port double wired together, plus constructors for the services
/// under test.
pub struct Harness {
    pub users: MockUserStore,
    pub tokens: MockTokenStore,
    pub hasher: MockHasher,
    pub codec: MockCodec,
    pub notifier: MockNotifier,
    pub links: crate::LinkSettings,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_notifier(MockNotifier::default())
    }

    pub fn with_notifier(notifier: MockNotifier) -> Self {
        Self {
            users: MockUserStore::default(),
            tokens: MockTokenStore::default(),
            hasher: MockHasher::default(),
            codec: MockCodec,
            notifier,
            links: link_settings(),
        }
    }

    pub fn authenticator(
        &self,
    ) -> crate::CredentialAuthenticator<'_, MockUserStore, MockTokenStore, MockHasher, MockCodec>
    {
        crate::CredentialAuthenticator::new(&self.users, &self.tokens, &self.hasher, &self.codec)
    }

    pub fn accounts(&self) -> crate::AccountService<'_, MockUserStore, MockHasher> {
        crate::AccountService::new(&self.users, &self.hasher)
    }
}
