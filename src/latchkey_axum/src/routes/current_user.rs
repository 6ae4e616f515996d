use std::collections::BTreeSet;

use axum::{Json, extract::State};
use latchkey_core::{Notifier, RecoveryTokenStore, Role, User, UserStore};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::ApiError, extractors::CurrentPrincipal, state::AppState};

/// Outward view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub enabled: bool,
    pub roles: BTreeSet<Role>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            email: user.email().as_ref().expose_secret().clone(),
            enabled: user.is_enabled(),
            roles: user.roles().clone(),
        }
    }
}

/// `GET user/current-user`: the stored record of the caller.
#[tracing::instrument(name = "Current user", skip_all)]
pub async fn current_user<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<Json<UserResponse>, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let user = state.accounts().get_by_email(principal.email()).await?;
    Ok(Json(user.into()))
}
