use latchkey_adapters::{
    HashMapRecoveryTokenStore, HashMapUserStore, JwtConfig, JwtTokenCodec, RecordingNotifier,
    config::test as test_config,
};
use latchkey_application::LinkSettings;
use latchkey_axum::AppState;
use latchkey_core::{Email, Role, UserStore};
use latchkey_service::AuthService;
use secrecy::Secret;
use serde_json::json;
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/api/v1";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub user_store: HashMapUserStore,
    pub token_store: HashMapRecoveryTokenStore,
    pub notifier: RecordingNotifier,
    pub codec: JwtTokenCodec,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_ttl(1800).await
    }

    /// Spawn the service with bearer tokens living `time_to_live_seconds`.
    pub async fn with_ttl(time_to_live_seconds: i64) -> Self {
        let listener = TcpListener::bind(test_config::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        let user_store = HashMapUserStore::new();
        let token_store = HashMapRecoveryTokenStore::new();
        let notifier = RecordingNotifier::new();
        let codec = JwtTokenCodec::new(JwtConfig {
            secret: Secret::new(test_config::JWT_SECRET.to_owned()),
            time_to_live_seconds,
        });
        let links = LinkSettings {
            server_host: address.clone(),
            api_prefix: API_PREFIX.to_owned(),
        };

        let state = AppState::new(
            user_store.clone(),
            token_store.clone(),
            notifier.clone(),
            codec.clone(),
            links,
        );
        let service = AuthService::new(state, API_PREFIX);

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            user_store,
            token_store,
            notifier,
            codec,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.address, API_PREFIX, path)
    }

    pub async fn get_ping(&self) -> reqwest::Response {
        self.http_client
            .get(format!("{}/ping", self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_signup<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(self.url("/auth/signup"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_login<Body: serde::Serialize>(&self, body: &Body) -> reqwest::Response {
        self.http_client
            .post(self.url("/auth/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_resend_confirmation(&self, email: &str) -> reqwest::Response {
        self.http_client
            .get(self.url(&format!("/auth/resend/email-confirmation/{email}")))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_url(&self, url: &str) -> reqwest::Response {
        self.http_client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_confirm_email(&self, token: &str) -> reqwest::Response {
        self.get_url(&self.url(&format!("/auth/email-confirm/{token}")))
            .await
    }

    pub async fn get_send_password_reset(&self, email: &str) -> reqwest::Response {
        self.http_client
            .get(self.url(&format!("/auth/send/reset-password-email/{email}")))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_change_password<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.http_client
            .post(self.url("/auth/change-password"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_current_user(&self, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(self.url("/user/current-user"));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request")
    }

    pub async fn get_all_users(&self, token: &str, query: &str) -> reqwest::Response {
        self.http_client
            .get(self.url(&format!("/user/all{query}")))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// The confirmation link from the latest message sent to `email`.
    pub async fn confirmation_link(&self, email: &str) -> String {
        let message = self
            .notifier
            .last_to(email)
            .await
            .expect("No message was sent");
        message
            .body
            .split_whitespace()
            .find(|word| word.starts_with("http"))
            .expect("No link in message")
            .to_owned()
    }

    /// The password reset token from the latest message sent to `email`.
    pub async fn reset_token(&self, email: &str) -> String {
        let message = self
            .notifier
            .last_to(email)
            .await
            .expect("No message was sent");
        message
            .body
            .rsplit(": ")
            .next()
            .expect("No token in message")
            .trim()
            .to_owned()
    }

    /// Sign up and follow the confirmation link.
    pub async fn signup_and_confirm(&self, email: &str, password: &str) {
        let response = self
            .post_signup(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let link = self.confirmation_link(email).await;
        let response = self.get_url(&link).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    /// Sign up, confirm and log in; returns the bearer token.
    pub async fn login_as(&self, email: &str, password: &str) -> String {
        self.signup_and_confirm(email, password).await;
        let response = self
            .post_login(&json!({ "email": email, "password": password }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let body: serde_json::Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_owned()
    }

    /// Grant `role` to a stored user directly in the store.
    pub async fn grant(&self, email: &str, role: Role) {
        let email = Email::try_from(email).unwrap();
        let mut user = self
            .user_store
            .find_by_email(&email)
            .await
            .unwrap()
            .expect("User not found");
        user.grant(role);
        self.user_store.save_user(user).await.unwrap();
    }
}

pub fn random_email() -> String {
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;

    SafeEmail().fake::<String>().to_lowercase()
}
