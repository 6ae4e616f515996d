//! # Latchkey
//!
//! Facade crate re-exporting the public APIs of the latchkey components:
//! stateless bearer tokens, single-use email verification and password reset
//! tokens, the request authentication filter and the account service.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! latchkey = { path = "../latchkey" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `User`, `RecoveryToken`, etc.
//! - **Ports**: `UserStore`, `RecoveryTokenStore`, `Notifier`, `PasswordHasher`, `TokenCodec`
//! - **Use cases**: `CredentialAuthenticator`, `AccountService`, `SignupUseCase`, etc.
//! - **Adapters**: `JwtTokenCodec`, `BearerFilter`, `PostgresUserStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `AuthService`, the router and standalone server

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use latchkey_core::*;
}

pub use latchkey_core::{
    BearerToken, Email, Page, PageRequest, Password, PasswordHash, Principal, RecoveryToken,
    RecoveryTokenValue, Role, SecurityContext, TokenPurpose, User, UserId,
};

// ============================================================================
// Ports
// ============================================================================

/// Store, notifier, hasher and codec traits
pub mod ports {
    pub use latchkey_core::{
        CredentialError, Notifier, PasswordHasher, PasswordHasherError, RecoveryTokenStore,
        RecoveryTokenStoreError, TokenCodec, TokenCodecError, UserStore, UserStoreError,
    };
}

pub use ports::{Notifier, PasswordHasher, RecoveryTokenStore, TokenCodec, UserStore};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use latchkey_application::*;
}

pub use latchkey_application::{
    AccountService, ConfirmEmailUseCase, CredentialAuthenticator, LinkSettings, LoginUseCase,
    RecoveryTokenManager, ResendConfirmationUseCase, ResetPasswordUseCase,
    SendPasswordResetUseCase, SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Bearer token codec
    pub mod auth {
        pub use latchkey_adapters::auth_validation::*;
    }

    /// Request authentication filter
    pub mod authentication {
        pub use latchkey_adapters::authentication::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use latchkey_adapters::persistence::*;
    }

    /// Notifier implementations
    pub mod email {
        pub use latchkey_adapters::email::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use latchkey_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use latchkey_adapters::config::*;
    }

    /// Axum integration
    pub mod axum {
        pub use latchkey_axum::*;
    }
}

pub use latchkey_adapters::{
    Argon2PasswordHasher, BearerFilter, HashMapRecoveryTokenStore, HashMapUserStore,
    JwtTokenCodec, LatchkeySettings, LoggingNotifier, PostgresRecoveryTokenStore,
    PostgresUserStore, PostmarkEmailClient, RecordingNotifier,
};

// ============================================================================
// Service (Main Entry Point)
// ============================================================================

pub use latchkey_axum::AppState;
pub use latchkey_service::{
    AuthService,
    helpers::{configure_email_client, configure_postgresql},
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
