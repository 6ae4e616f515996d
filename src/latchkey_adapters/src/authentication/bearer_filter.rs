//! Request authentication filter.
//!
//! Runs once per request, before any handler or authorization check. It never
//! consults the user store: a request carrying a valid bearer credential is
//! authenticated with exactly the identity and roles encoded in it.

use latchkey_core::{
    AuthRequest, AuthResponseBuilder, AuthResponseHelpers, SecurityContext, TokenCodec,
};

/// What the framework should do with the request after the filter ran.
#[derive(Debug)]
pub enum FilterOutcome<R> {
    /// Hand the request to the next stage. The context may or may not hold a
    /// principal.
    Continue,
    /// Stop the chain and send this response.
    Reject(R),
}

#[derive(Clone)]
pub struct BearerFilter<C> {
    codec: C,
}

impl<C> BearerFilter<C>
where
    C: TokenCodec,
{
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Authenticate `request` into `context`.
    ///
    /// Requests without a bearer header pass through anonymously. Expired or
    /// malformed credentials are answered with a plain-text 401 built from
    /// `builder`. A principal already present in `context` is left untouched.
    #[tracing::instrument(
        name = "BearerFilter::apply",
        skip_all,
        fields(method = %request.method(), path = %request.path())
    )]
    pub fn apply<Req, B>(
        &self,
        request: &Req,
        context: &mut SecurityContext,
        builder: B,
    ) -> FilterOutcome<B::Response>
    where
        Req: AuthRequest,
        B: AuthResponseBuilder,
    {
        let Some(token) = request.bearer_token() else {
            return FilterOutcome::Continue;
        };

        match self.codec.parse(token) {
            Ok(principal) => {
                if !context.attach(principal) {
                    tracing::debug!("Security context already populated");
                }
                FilterOutcome::Continue
            }
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer credential");
                FilterOutcome::Reject(builder.unauthorized(&e.to_string()))
            }
        }
    }
}
