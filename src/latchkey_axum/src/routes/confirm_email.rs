use axum::extract::{Path, State};
use latchkey_application::ConfirmEmailUseCase;
use latchkey_core::{Notifier, RecoveryTokenStore, RecoveryTokenValue, UserStore};

use crate::{error::ApiError, state::AppState};

pub const EMAIL_VERIFIED_MESSAGE: &str = "Email successfully verified.";

/// `GET auth/email-confirm/{token}`: enable the account behind a confirmation
/// link.
#[tracing::instrument(name = "Confirm email", skip_all)]
pub async fn confirm_email<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    Path(token): Path<String>,
) -> Result<&'static str, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let value = RecoveryTokenValue::from(token);

    let authenticator = state.authenticator();
    let accounts = state.accounts();
    ConfirmEmailUseCase::new(&authenticator, &accounts)
        .execute(&value)
        .await?;

    Ok(EMAIL_VERIFIED_MESSAGE)
}
