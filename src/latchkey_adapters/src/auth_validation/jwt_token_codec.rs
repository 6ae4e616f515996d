use std::collections::BTreeSet;

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use latchkey_core::{
    BearerToken, CredentialError, Email, Principal, Role, TokenCodec, TokenCodecError,
};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: Secret<String>,
    pub time_to_live_seconds: i64,
}

impl JwtConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: usize,
    pub exp: usize,
}

/// HS256 bearer credentials signed with a shared secret.
#[derive(Clone)]
pub struct JwtTokenCodec {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtTokenCodec {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.as_bytes()),
            validation,
            config,
        }
    }

    fn claims_for(&self, email: &Email, roles: &BTreeSet<Role>) -> Result<Claims, TokenCodecError> {
        let ttl = chrono::Duration::try_seconds(self.config.time_to_live_seconds).ok_or_else(
            || TokenCodecError::IssueFailed("Failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenCodecError::IssueFailed("Duration out of range".to_string()))?;

        Ok(Claims {
            sub: email.as_ref().expose_secret().clone(),
            roles: roles.iter().map(|r| r.as_str().to_owned()).collect(),
            iat: to_usize(now.timestamp())?,
            exp: to_usize(exp.timestamp())?,
        })
    }
}

fn to_usize(timestamp: i64) -> Result<usize, TokenCodecError> {
    timestamp
        .try_into()
        .map_err(|_| TokenCodecError::IssueFailed("Failed to cast i64 to usize".to_string()))
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, email: &Email, roles: &BTreeSet<Role>) -> Result<BearerToken, TokenCodecError> {
        let claims = self.claims_for(email, roles)?;
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map(BearerToken::from)
            .map_err(|e| TokenCodecError::IssueFailed(e.to_string()))
    }

    fn parse(&self, token: &str) -> Result<Principal, CredentialError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => CredentialError::ExpiredCredential,
                _ => CredentialError::MalformedCredential,
            })?;

        let email =
            Email::try_from(claims.sub.as_str()).map_err(|_| CredentialError::MalformedCredential)?;
        let roles = claims
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(|_| CredentialError::MalformedCredential)?;

        Ok(Principal::new(email, roles))
    }
}
