use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use latchkey_application::SignupUseCase;
use latchkey_core::{Notifier, RecoveryTokenStore, UserStore};

use super::credentials::CredentialsRequest;
use crate::{error::ApiError, state::AppState};

/// `POST auth/signup`: register a disabled account and mail the confirmation
/// link.
#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let Json(request) = payload?;
    let (email, password) = request.parse()?;

    let authenticator = state.authenticator();
    SignupUseCase::new(&authenticator, state.notifier.as_ref(), &state.links)
        .execute(email, password)
        .await?;

    Ok(StatusCode::CREATED)
}
