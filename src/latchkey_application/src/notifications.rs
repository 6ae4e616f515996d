//! Outbound message rendering for the recovery workflows.

use askama::Template;
use latchkey_core::{Email, Notifier, RECOVERY_TOKEN_LIFETIME_MINUTES, RecoveryTokenValue};
use secrecy::ExposeSecret;

pub const EMAIL_VERIFICATION_SUBJECT: &str = "Email verification.";
pub const PASSWORD_RESET_SUBJECT: &str = "Password reset.";

/// Where confirmation links point.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Public base URL of the service, e.g. `http://localhost:3000`.
    pub server_host: String,
    /// Route prefix the API is nested under, e.g. `/api/v1`.
    pub api_prefix: String,
}

impl LinkSettings {
    pub fn confirmation_link(&self, token: &RecoveryTokenValue) -> String {
        format!(
            "{}{}/auth/email-confirm/{}",
            self.server_host.trim_end_matches('/'),
            self.api_prefix,
            token.as_ref().expose_secret()
        )
    }
}

#[derive(Template)]
#[template(
    source = "Please confirm your email address by following this link: {{ link }}\n\
              The link expires in {{ lifetime_minutes }} minutes.",
    ext = "txt"
)]
struct EmailVerificationBody<'a> {
    link: &'a str,
    lifetime_minutes: i64,
}

#[derive(Template)]
#[template(source = "Your password reset token: {{ token }}", ext = "txt")]
struct PasswordResetBody<'a> {
    token: &'a str,
}

pub fn email_verification_body(
    links: &LinkSettings,
    token: &RecoveryTokenValue,
) -> Result<String, askama::Error> {
    let link = links.confirmation_link(token);
    EmailVerificationBody {
        link: &link,
        lifetime_minutes: RECOVERY_TOKEN_LIFETIME_MINUTES,
    }
    .render()
}

pub fn password_reset_body(token: &RecoveryTokenValue) -> Result<String, askama::Error> {
    PasswordResetBody {
        token: token.as_ref().expose_secret(),
    }
    .render()
}

/// Hand a rendered message to the notifier.
///
/// Delivery problems are logged and swallowed; the workflow that triggered
/// the message has already committed its state change.
pub(crate) async fn deliver<N>(
    notifier: &N,
    destination: &Email,
    subject: &str,
    body: Result<String, askama::Error>,
) where
    N: Notifier,
{
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, subject, "Failed to render notification");
            return;
        }
    };
    if let Err(e) = notifier.notify(destination, subject, &body).await {
        tracing::warn!(error = %e, subject, "Failed to deliver notification");
    }
}
