use latchkey_adapters::{
    HashMapRecoveryTokenStore, HashMapUserStore, JwtConfig, JwtTokenCodec, RecordingNotifier,
};
use latchkey_application::LinkSettings;
use latchkey_core::{
    BearerToken, Email, Password, PasswordHasher, Role, SecurityContext, TokenCodec, User,
    UserStore,
};
use secrecy::Secret;

use crate::state::AppState;

pub type TestState = AppState<HashMapUserStore, HashMapRecoveryTokenStore, RecordingNotifier>;

pub fn state() -> (TestState, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let codec = JwtTokenCodec::new(JwtConfig {
        secret: Secret::new("handler-test-secret".to_string()),
        time_to_live_seconds: 1800,
    });
    let links = LinkSettings {
        server_host: "http://localhost:3000".to_string(),
        api_prefix: "/api/v1".to_string(),
    };
    let state = AppState::new(
        HashMapUserStore::new(),
        HashMapRecoveryTokenStore::new(),
        notifier.clone(),
        codec,
        links,
    );
    (state, notifier)
}

/// Store a user directly, bypassing signup.
pub async fn insert_user(state: &TestState, raw_email: &str, raw_password: &str, admin: bool) -> User {
    let hash = state
        .hasher
        .hash(Password::try_from(raw_password).unwrap())
        .await
        .unwrap();
    let mut user = User::register(Email::try_from(raw_email).unwrap(), hash);
    user.enable();
    if admin {
        user.grant(Role::Admin);
    }
    state.user_store.save_user(user).await.unwrap()
}

pub fn context_for(state: &TestState, user: &User) -> SecurityContext {
    let token: BearerToken = state.codec.issue(user.email(), user.roles()).unwrap();
    SecurityContext::authenticated(state.codec.parse(token.as_str()).unwrap())
}
