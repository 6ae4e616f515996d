//! Request-scoped authentication state.
//!
//! A [`SecurityContext`] is created per inbound request by the bearer filter and
//! travels with that request (in axum: the request extensions). It is never
//! shared between requests, and nothing here reads the user store: roles come
//! from the credential as they were at issue time.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::domain::{email::Email, role::Role};

/// The authenticated identity carried by a valid bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    email: Email,
    roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(email: Email, roles: BTreeSet<Role>) -> Self {
        Self { email, roles }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    #[error("Authentication is required.")]
    Unauthenticated,
    #[error("Role {0} is required.")]
    MissingRole(Role),
}

#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Principal>,
}

impl SecurityContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Attach a principal unless one is already present.
    ///
    /// Returns `true` when the principal was attached.
    pub fn attach(&mut self, principal: Principal) -> bool {
        if self.principal.is_some() {
            return false;
        }
        self.principal = Some(principal);
        true
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn require_authenticated(&self) -> Result<&Principal, AccessDenied> {
        self.principal.as_ref().ok_or(AccessDenied::Unauthenticated)
    }

    pub fn require_role(&self, role: Role) -> Result<&Principal, AccessDenied> {
        let principal = self.require_authenticated()?;
        if principal.has_role(role) {
            Ok(principal)
        } else {
            Err(AccessDenied::MissingRole(role))
        }
    }
}
