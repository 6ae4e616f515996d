use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use latchkey_application::SendPasswordResetUseCase;
use latchkey_core::{Email, Notifier, RecoveryTokenStore, UserStore};
use secrecy::Secret;

use crate::{error::ApiError, state::AppState};

/// `GET auth/send/reset-password-email/{email}`: mail a password reset token.
#[tracing::instrument(name = "Send password reset", skip_all)]
pub async fn send_password_reset<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    Path(email): Path<String>,
) -> Result<StatusCode, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let email = Email::try_from(Secret::new(email))?;

    let authenticator = state.authenticator();
    let accounts = state.accounts();
    SendPasswordResetUseCase::new(&authenticator, &accounts, state.notifier.as_ref())
        .execute(&email)
        .await?;

    Ok(StatusCode::OK)
}
