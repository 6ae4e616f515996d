use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::user::UserId;

/// Recovery tokens live for one hour after issuance or refresh.
pub const RECOVERY_TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Which workflow a recovery token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::EmailVerification => "email_verification",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown token purpose: {0}")]
pub struct UnknownPurpose(pub String);

impl FromStr for TokenPurpose {
    type Err = UnknownPurpose;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email_verification" => Ok(TokenPurpose::EmailVerification),
            "password_reset" => Ok(TokenPurpose::PasswordReset),
            other => Err(UnknownPurpose(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecoveryTokenId(Uuid);

impl RecoveryTokenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecoveryTokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecoveryTokenId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecoveryTokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The opaque value sent to the user's address.
///
/// Values are random v4 UUIDs, i.e. 122 bits from the OS CSPRNG.
#[derive(Debug, Clone)]
pub struct RecoveryTokenValue(Secret<String>);

impl RecoveryTokenValue {
    pub fn generate() -> Self {
        Self(Secret::new(Uuid::new_v4().to_string()))
    }
}

impl From<String> for RecoveryTokenValue {
    fn from(value: String) -> Self {
        Self(Secret::new(value))
    }
}

impl AsRef<Secret<String>> for RecoveryTokenValue {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for RecoveryTokenValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for RecoveryTokenValue {}

/// Single-use, expiring token gating email confirmation or password reset.
///
/// At most one token per (user, purpose) exists; [`RecoveryToken::refresh`]
/// replaces value and expiry in place so the record keeps its id.
#[derive(Debug, Clone)]
pub struct RecoveryToken {
    id: RecoveryTokenId,
    purpose: TokenPurpose,
    value: RecoveryTokenValue,
    user_id: UserId,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecoveryToken {
    pub fn lifetime() -> Duration {
        Duration::minutes(RECOVERY_TOKEN_LIFETIME_MINUTES)
    }

    pub fn issue(user_id: UserId, purpose: TokenPurpose, now: DateTime<Utc>) -> Self {
        Self {
            id: RecoveryTokenId::new(),
            purpose,
            value: RecoveryTokenValue::generate(),
            user_id,
            expires_at: now + Self::lifetime(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn from_parts(
        id: RecoveryTokenId,
        purpose: TokenPurpose,
        value: RecoveryTokenValue,
        user_id: UserId,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            purpose,
            value,
            user_id,
            expires_at,
            created_at,
            updated_at,
        }
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) {
        self.value = RecoveryTokenValue::generate();
        self.expires_at = now + Self::lifetime();
        self.updated_at = now;
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn id(&self) -> &RecoveryTokenId {
        &self.id
    }

    pub fn purpose(&self) -> TokenPurpose {
        self.purpose
    }

    pub fn value(&self) -> &RecoveryTokenValue {
        &self.value
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
