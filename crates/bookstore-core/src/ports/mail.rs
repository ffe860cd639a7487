//! Outbound mail port.

use async_trait::async_trait;

/// A plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery: an SMTP client in deployments, a logging stub otherwise.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// Sender or recipient could not form a valid message.
    #[error("Mail message invalid: {0}")]
    InvalidMessage(String),

    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}
