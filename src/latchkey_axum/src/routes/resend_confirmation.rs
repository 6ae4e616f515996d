use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use latchkey_application::ResendConfirmationUseCase;
use latchkey_core::{Email, Notifier, RecoveryTokenStore, UserStore};
use secrecy::Secret;

use crate::{error::ApiError, state::AppState};

/// `GET auth/resend/email-confirmation/{email}`: mail a fresh confirmation link.
#[tracing::instrument(name = "Resend email confirmation", skip_all)]
pub async fn resend_confirmation<U, T, N>(
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
    ResendConfirmationUseCase::new(
        &authenticator,
        &accounts,
        state.notifier.as_ref(),
        &state.links,
    )
    .execute(&email)
    .await?;

    Ok(StatusCode::OK)
}
