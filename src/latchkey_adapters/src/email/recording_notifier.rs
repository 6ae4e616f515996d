use std::sync::Arc;

use latchkey_core::{Email, Notifier};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedMessage {
    pub destination: String,
    pub subject: String,
    pub body: String,
}

/// Keeps every message in memory so tests can read tokens back out.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<RwLock<Vec<RecordedMessage>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<RecordedMessage> {
        self.messages.read().await.clone()
    }

    /// Most recent message sent to `destination`, if any.
    pub async fn last_to(&self, destination: &str) -> Option<RecordedMessage> {
        let destination = destination.to_lowercase();
        self.messages
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.destination == destination)
            .cloned()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, destination: &Email, subject: &str, body: &str) -> Result<(), String> {
        self.messages.write().await.push(RecordedMessage {
            destination: destination.as_ref().expose_secret().clone(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}
