use async_trait::async_trait;

use bookstore_core::ports::{MailError, MailMessage, Mailer};

use crate::mask_email;

/// Logs messages instead of sending them (for development).
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            body = %message.body,
            "Mail not sent (MAIL_SERVER not configured)"
        );
        Ok(())
    }
}
