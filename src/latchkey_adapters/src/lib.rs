pub mod auth_validation;
pub mod authentication;
pub mod config;
pub mod email;
pub mod hashing;
pub mod persistence;

pub use auth_validation::{JwtConfig, JwtTokenCodec};
pub use authentication::{BearerFilter, FilterOutcome};
pub use crate::config::{AllowedOrigins, LatchkeySettings, SettingsError};
pub use email::{LoggingNotifier, PostmarkEmailClient, RecordingNotifier};
pub use hashing::Argon2PasswordHasher;
pub use persistence::{
    HashMapRecoveryTokenStore, HashMapUserStore, PostgresRecoveryTokenStore, PostgresUserStore,
};
