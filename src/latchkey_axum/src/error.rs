use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use latchkey_application::{
    AccountError, AuthenticatorError, ConfirmEmailError, RecoveryTokenError,
    ResendConfirmationError, ResetPasswordError, SendPasswordResetError, SignupError,
};
use latchkey_core::{AccessDenied, EmailError, PageError, PasswordError, TokenPurpose};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("User with same email is already exists.")]
    DuplicateIdentity,

    #[error("{} token is invalid.", token_label(.0))]
    InvalidRecoveryToken(TokenPurpose),

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Authentication is required.")]
    Unauthenticated,

    #[error("User account is not enabled.")]
    AccountDisabled,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Details are logged, never sent.
    #[error("Something went wrong.")]
    Unexpected(String),
}

fn token_label(purpose: &TokenPurpose) -> &'static str {
    match purpose {
        TokenPurpose::EmailVerification => "Email verification",
        TokenPurpose::PasswordReset => "Password reset",
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::DuplicateIdentity
            | ApiError::InvalidRecoveryToken(_) => StatusCode::BAD_REQUEST,

            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,

            ApiError::AccountDisabled | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,

            ApiError::NotFound(_) => StatusCode::NOT_FOUND,

            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map an authenticator failure. `purpose` names the recovery token the
    /// caller presented, if any.
    fn from_authenticator(error: AuthenticatorError, purpose: Option<TokenPurpose>) -> Self {
        match error {
            AuthenticatorError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthenticatorError::DuplicateIdentity => ApiError::DuplicateIdentity,
            AuthenticatorError::AccountDisabled => ApiError::AccountDisabled,
            AuthenticatorError::RecoveryToken(
                e @ (RecoveryTokenError::TokenNotFound | RecoveryTokenError::TokenExpired),
            ) => match purpose {
                Some(purpose) => {
                    tracing::info!(reason = %e, %purpose, "Rejected recovery token");
                    ApiError::InvalidRecoveryToken(purpose)
                }
                None => ApiError::Unexpected(e.to_string()),
            },
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if let ApiError::Unexpected(details) = &self {
            tracing::error!(error = %details, "Unexpected error while handling request");
        }

        let body = Json(ErrorResponse {
            timestamp: Utc::now(),
            message: self.to_string(),
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<PageError> for ApiError {
    fn from(error: PageError) -> Self {
        ApiError::Validation(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl From<AccessDenied> for ApiError {
    fn from(error: AccessDenied) -> Self {
        match error {
            AccessDenied::Unauthenticated => ApiError::Unauthenticated,
            AccessDenied::MissingRole(_) => ApiError::Forbidden(error.to_string()),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(error: AccountError) -> Self {
        match error {
            AccountError::ResourceNotFound(message) => ApiError::NotFound(message),
            other => ApiError::Unexpected(other.to_string()),
        }
    }
}

impl From<AuthenticatorError> for ApiError {
    fn from(error: AuthenticatorError) -> Self {
        ApiError::from_authenticator(error, None)
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::Authenticator(e) => e.into(),
        }
    }
}

impl From<ResendConfirmationError> for ApiError {
    fn from(error: ResendConfirmationError) -> Self {
        match error {
            ResendConfirmationError::Account(e) => e.into(),
            ResendConfirmationError::Authenticator(e) => e.into(),
        }
    }
}

impl From<SendPasswordResetError> for ApiError {
    fn from(error: SendPasswordResetError) -> Self {
        match error {
            SendPasswordResetError::Account(e) => e.into(),
            SendPasswordResetError::Authenticator(e) => e.into(),
        }
    }
}

impl From<ConfirmEmailError> for ApiError {
    fn from(error: ConfirmEmailError) -> Self {
        match error {
            ConfirmEmailError::Authenticator(e) => {
                ApiError::from_authenticator(e, Some(TokenPurpose::EmailVerification))
            }
            ConfirmEmailError::Account(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::Authenticator(e) => {
                ApiError::from_authenticator(e, Some(TokenPurpose::PasswordReset))
            }
            ResetPasswordError::Account(e) => e.into(),
        }
    }
}
