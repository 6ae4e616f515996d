use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use latchkey_application::LoginUseCase;
use latchkey_core::{Notifier, RecoveryTokenStore, UserStore};
use serde::{Deserialize, Serialize};

use super::credentials::CredentialsRequest;
use crate::{error::ApiError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST auth/login`: exchange credentials for a bearer token.
#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let Json(request) = payload?;
    let (email, password) = request.parse()?;

    let authenticator = state.authenticator();
    let token = LoginUseCase::new(&authenticator)
        .execute(email, password)
        .await?;

    Ok(Json(TokenResponse {
        token: token.into_string(),
    }))
}
