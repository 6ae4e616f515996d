use latchkey_core::{Email, Notifier};

/// Writes outbound messages to the log instead of sending them.
///
/// Used when no email provider is configured. The body is logged at debug
/// level only since it carries recovery tokens.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Notifier for LoggingNotifier {
    #[tracing::instrument(name = "LoggingNotifier::notify", skip_all)]
    async fn notify(&self, destination: &Email, subject: &str, body: &str) -> Result<(), String> {
        tracing::info!(subject, "Notification not delivered: no email client configured");
        tracing::debug!(?destination, body, "Notification content");
        Ok(())
    }
}
