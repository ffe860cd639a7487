use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use bookstore_core::ports::{MailError, MailMessage, Mailer};

use super::MailConfig;
use crate::mask_email;

/// Sends plain-text mail through a pooled SMTP connection.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Fails when `server` is missing or unusable as a TLS host name, or when
    /// the default sender is not a mailbox.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let server = config
            .server
            .as_deref()
            .ok_or_else(|| MailError::Delivery("no SMTP server configured".to_string()))?;

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(server)
                .map_err(|e| MailError::Delivery(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(server)
        };

        let mut builder = builder.port(config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let sender = config
            .default_sender
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("sender: {e}")))?;

        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }

    fn compose(&self, message: MailMessage) -> Result<Message, MailError> {
        let recipient: Mailbox = message
            .to
            .parse()
            .map_err(|e| MailError::InvalidMessage(format!("recipient: {e}")))?;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| MailError::InvalidMessage(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        let to = mask_email(&message.to);
        let email = self.compose(message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        tracing::debug!(to = %to, "Mail accepted by SMTP server");
        Ok(())
    }
}
