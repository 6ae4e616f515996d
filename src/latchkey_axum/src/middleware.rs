use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use latchkey_adapters::{BearerFilter, FilterOutcome};
use latchkey_core::{SecurityContext, TokenCodec};

use crate::adapters::{AxumRequest, response_builder};

/// Runs the bearer filter in front of every route.
///
/// Mount with `axum::middleware::from_fn_with_state(filter, authenticate::<C>)`.
/// On success the request continues with a [`SecurityContext`] in its
/// extensions; an invalid or expired credential ends the request with a
/// plain-text 401.
pub async fn authenticate<C>(
    State(filter): State<BearerFilter<C>>,
    request: Request,
    next: Next,
) -> Response
where
    C: TokenCodec + Clone + 'static,
{
    let request = AxumRequest::from(request);
    let mut context = request
        .0
        .extensions()
        .get::<SecurityContext>()
        .cloned()
        .unwrap_or_default();

    let outcome = filter.apply(&request, &mut context, response_builder());
    match outcome {
        FilterOutcome::Reject(response) => response,
        FilterOutcome::Continue => {
            let mut request = request.into_inner();
            request.extensions_mut().insert(context);
            next.run(request).await
        }
    }
}
