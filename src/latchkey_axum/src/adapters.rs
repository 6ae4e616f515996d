//! Axum implementations of the `latchkey_core` HTTP traits.
//!
//! The traits live in `latchkey_core`, so they are implemented here on
//! newtype wrappers to satisfy the orphan rule:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  latchkey_core::AuthRequest (trait)        │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest(axum::extract::Request)       │
//! │  impl AuthRequest for AxumRequest { }      │
//! └────────────────────────────────────────────┘
//! ```

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Response, StatusCode, header};
use latchkey_core::{AuthRequest, AuthResponseBuilder};

/// Newtype wrapper around axum's request so the bearer filter can read it.
#[repr(transparent)]
pub struct AxumRequest(pub Request);

impl AxumRequest {
    pub fn into_inner(self) -> Request {
        self.0
    }
}

impl From<Request> for AxumRequest {
    fn from(req: Request) -> Self {
        AxumRequest(req)
    }
}

impl AuthRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.headers().get(name)?.to_str().ok()
    }

    fn method(&self) -> &str {
        self.0.method().as_str()
    }

    fn path(&self) -> &str {
        self.0.uri().path()
    }
}

/// Builds axum responses for the bearer filter.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn text_body(mut self, body: &str) -> Self {
        self.builder = self
            .builder
            .header(header::CONTENT_TYPE, "text/plain; charset=utf-8");
        self.body = Some(body.to_owned());
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        match self.builder.body(Body::from(body)) {
            Ok(response) => response,
            Err(e) => {
                // Only reachable with an invalid status code.
                tracing::error!(error = %e, "Failed to build response");
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

/// Convenience constructor for handlers and middleware.
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
