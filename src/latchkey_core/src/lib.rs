pub mod domain;
pub mod http_abstraction;
pub mod ports;
pub mod security_context;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    bearer_token::BearerToken,
    email::{Email, EmailError},
    page::{Page, PageError, PageRequest},
    password::{Password, PasswordError, PasswordHash},
    recovery_token::{
        RECOVERY_TOKEN_LIFETIME_MINUTES, RecoveryToken, RecoveryTokenId, RecoveryTokenValue,
        TokenPurpose, UnknownPurpose,
    },
    role::{Role, UnknownRole},
    user::{User, UserId},
};

pub use ports::{
    repositories::{RecoveryTokenStore, RecoveryTokenStoreError, UserStore, UserStoreError},
    services::{Notifier, PasswordHasher, PasswordHasherError},
};

pub use strategies::token_codec::{CredentialError, TokenCodec, TokenCodecError};

pub use security_context::{AccessDenied, Principal, SecurityContext};

pub use http_abstraction::{AuthRequest, AuthResponseBuilder, AuthResponseHelpers};
