use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use latchkey_application::ResetPasswordUseCase;
use latchkey_core::{Notifier, Password, RecoveryTokenStore, RecoveryTokenValue, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub verification_token: String,
    pub new_password: Secret<String>,
}

/// `POST auth/change-password`: set a new password with a reset token.
#[tracing::instrument(name = "Change password", skip_all)]
pub async fn change_password<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let Json(request) = payload?;
    let new_password = Password::parse(request.new_password)?;
    let value = RecoveryTokenValue::from(request.verification_token);

    let authenticator = state.authenticator();
    let accounts = state.accounts();
    ResetPasswordUseCase::new(&authenticator, &accounts)
        .execute(&value, new_password)
        .await?;

    Ok(StatusCode::OK)
}
