//! Chat notification interface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier is not connected")]
    NotConnected,

    #[error("notifier credentials were rejected")]
    Unauthorized,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait::async_trait]
pub trait Notifier {
    /// Deliver a plain-text message to a channel
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<(), NotifyError>;
}
