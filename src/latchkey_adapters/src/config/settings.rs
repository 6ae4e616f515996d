use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigBuilder, Environment, File, builder::DefaultState};
use latchkey_application::LinkSettings;
use latchkey_core::{Email, EmailError};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use crate::auth_validation::JwtConfig;
use crate::config::constants::{
    DEFAULT_API_PREFIX, DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT, MAX_BEARER_TTL_SECONDS,
    env::{CONFIG_DIR_ENV_VAR, ENV_PREFIX, ENV_SEPARATOR, ENVIRONMENT_ENV_VAR},
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Origins allowed to make cross-origin requests. Empty disables CORS.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    /// Public base URL used in confirmation links.
    pub server_host: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub time_to_live_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<Secret<String>>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<Email, EmailError> {
        Email::try_from(self.sender.as_str())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatchkeySettings {
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub email_client: Option<EmailClientSettings>,
}

impl LatchkeySettings {
    /// Load `.env`, then `config/base`, then `config/{LATCHKEY_ENVIRONMENT}`,
    /// then `LATCHKEY__*` environment variables. Later sources win.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let config_dir = PathBuf::from(
            std::env::var(CONFIG_DIR_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_owned()),
        );
        let environment =
            std::env::var(ENVIRONMENT_ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let config = Self::builder()?
            .add_source(File::from(config_dir.join("base")).required(false))
            .add_source(File::from(config_dir.join(&environment)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins"),
            )
            .build()?;

        Self::from_config(config)
    }

    /// A builder pre-populated with every default.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("application.host", "127.0.0.1")?
            .set_default("application.port", 3000)?
            .set_default("application.api_prefix", DEFAULT_API_PREFIX)?
            .set_default("application.server_host", "http://localhost:3000")?
            .set_default("application.allowed_origins", Vec::<String>::new())?
            .set_default("jwt.time_to_live_seconds", 30 * 60)?
            .set_default("database.max_connections", 5)?)
    }

    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let ttl = self.jwt.time_to_live_seconds;
        if ttl <= 0 || ttl >= MAX_BEARER_TTL_SECONDS {
            return Err(SettingsError::Invalid(format!(
                "jwt.time_to_live_seconds must be between 1 and {}, got {ttl}",
                MAX_BEARER_TTL_SECONDS - 1
            )));
        }
        if self.jwt.secret.expose_secret().is_empty() {
            return Err(SettingsError::Invalid("jwt.secret is empty".to_owned()));
        }

        let prefix = &self.application.api_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(SettingsError::Invalid(format!(
                "application.api_prefix must start and not end with '/', got {prefix:?}"
            )));
        }

        if let Some(email_client) = &self.email_client {
            email_client.sender().map_err(|e| {
                SettingsError::Invalid(format!("email_client.sender: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt.secret.clone(),
            time_to_live_seconds: self.jwt.time_to_live_seconds,
        }
    }

    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            server_host: self.application.server_host.clone(),
            api_prefix: self.application.api_prefix.clone(),
        }
    }
}
