//! Framework-agnostic HTTP traits used by the bearer filter.
//!
//! Web frameworks implement these on newtype wrappers of their own request and
//! response builder types, so the filter logic in `latchkey_adapters` never
//! depends on a particular framework.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  latchkey_core: AuthRequest /            │
//! │  AuthResponseBuilder traits              │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  latchkey_axum: AxumRequest,             │
//! │  AxumResponseBuilder newtypes            │
//! └──────────────────────────────────────────┘
//! ```

const BEARER_PREFIX: &str = "Bearer ";

/// Trait for HTTP requests that can be authenticated.
pub trait AuthRequest {
    /// Get a header value by name.
    ///
    /// Header lookup should be case-insensitive (per HTTP spec).
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;

    /// The credential of an `Authorization: Bearer <token>` header.
    ///
    /// `None` when the header is absent or uses another scheme.
    fn bearer_token(&self) -> Option<&str> {
        self.header("authorization")?.strip_prefix(BEARER_PREFIX)
    }
}

/// Trait for building HTTP responses.
///
/// Follows the builder pattern:
/// ```ignore
/// builder
///     .status(401)
///     .text_body("Invalid token.")
///     .build()
/// ```
pub trait AuthResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Set a plain-text body with Content-Type header
    fn text_body(self, body: &str) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Helper methods for creating common responses.
///
/// Automatically implemented for all types that implement `AuthResponseBuilder`.
pub trait AuthResponseHelpers: AuthResponseBuilder {
    /// Create a 401 Unauthorized plain-text response
    fn unauthorized(self, message: &str) -> Self::Response {
        self.status(401).text_body(message).build()
    }
}

// Blanket implementation for all AuthResponseBuilder types
impl<T: AuthResponseBuilder> AuthResponseHelpers for T {}
