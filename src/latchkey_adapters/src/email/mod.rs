pub mod logging_notifier;
pub mod postmark_email_client;
pub mod recording_notifier;

pub use logging_notifier::LoggingNotifier;
pub use postmark_email_client::PostmarkEmailClient;
pub use recording_notifier::{RecordedMessage, RecordingNotifier};
