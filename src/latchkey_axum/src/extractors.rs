//! Principal extractors.
//!
//! Both read the [`SecurityContext`] the bearer middleware stored in the
//! request extensions. A request that never passed through the middleware is
//! treated as anonymous.

use axum::{extract::FromRequestParts, http::request::Parts};
use latchkey_core::{AccessDenied, Principal, Role, SecurityContext};

use crate::error::ApiError;

/// Any authenticated caller. Rejects with 401 otherwise.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

/// An authenticated caller holding [`Role::Admin`]. Rejects with 401 when
/// anonymous and 403 when the role is missing.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

fn require(parts: &Parts, role: Option<Role>) -> Result<Principal, AccessDenied> {
    let Some(context) = parts.extensions.get::<SecurityContext>() else {
        return Err(AccessDenied::Unauthenticated);
    };

    let principal = match role {
        Some(role) => context.require_role(role)?,
        None => context.require_authenticated()?,
    };
    Ok(principal.clone())
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(CurrentPrincipal(require(parts, None)?))
    }
}

impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = require(parts, Some(Role::Admin)).inspect_err(|e| {
            tracing::debug!(reason = %e, "Admin access denied");
        })?;
        Ok(AdminPrincipal(principal))
    }
}
