use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    domain::{bearer_token::BearerToken, email::Email, role::Role},
    security_context::Principal,
};

/// Why a presented bearer credential was refused.
///
/// The display strings are the exact bodies of the 401 responses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Token is expired.")]
    ExpiredCredential,
    #[error("Invalid token.")]
    MalformedCredential,
}

#[derive(Debug, Error)]
pub enum TokenCodecError {
    #[error("Failed to issue bearer credential: {0}")]
    IssueFailed(String),
}

/// Encodes and verifies the stateless bearer credential.
///
/// Implementations own the signing key; nothing is stored server-side, so
/// validity is decided by signature and expiry alone.
pub trait TokenCodec: Send + Sync {
    /// Produce a signed credential binding the identity and its roles.
    fn issue(&self, email: &Email, roles: &BTreeSet<Role>) -> Result<BearerToken, TokenCodecError>;

    /// Verify signature and expiry and return the bound identity.
    ///
    /// Must not have side effects.
    fn parse(&self, token: &str) -> Result<Principal, CredentialError>;
}
