use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use latchkey_core::{Notifier, Page, PageRequest, RecoveryTokenStore, UserStore};
use serde::Deserialize;

use super::current_user::UserResponse;
use crate::{error::ApiError, extractors::AdminPrincipal, state::AppState};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "page-number", default)]
    pub page_number: u32,
    #[serde(rename = "page-size", default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    PageRequest::default().size()
}

/// `GET user/all?page-number&page-size`: page through every user. Admin only.
#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users<U, T, N>(
    State(state): State<AppState<U, T, N>>,
    _admin: AdminPrincipal,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<UserResponse>>, ApiError>
where
    U: UserStore + Clone + 'static,
    T: RecoveryTokenStore + Clone + 'static,
    N: Notifier + 'static,
{
    let Query(params) = params?;
    let request = PageRequest::new(params.page_number, params.page_size)?;

    let page = state.accounts().list_users(request).await?;
    Ok(Json(page.map(UserResponse::from)))
}
