//! Mail delivery implementations.

mod log;
mod smtp;

use std::sync::Arc;

use bookstore_core::ports::Mailer;

pub use log::LogMailer;
pub use smtp::SmtpMailer;

const DEFAULT_SMTP_PORT: u16 = 587;

/// Outbound mail settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// SMTP host. Mail is only logged when unset.
    pub server: Option<String>,
    pub port: u16,
    /// Upgrade the connection with STARTTLS before authenticating.
    pub use_tls: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub default_sender: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: None,
            port: DEFAULT_SMTP_PORT,
            use_tls: false,
            username: None,
            password: None,
            default_sender: "noreply@bookstore.local".to_string(),
        }
    }
}

impl MailConfig {
    /// `MAIL_SERVER`, `MAIL_PORT`, `MAIL_USE_TLS` (any value enables it),
    /// `MAIL_USERNAME`, `MAIL_PASSWORD` and `MAIL_DEFAULT_SENDER`.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            server: var("MAIL_SERVER"),
            port: var("MAIL_PORT")
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            use_tls: var("MAIL_USE_TLS").is_some(),
            username: var("MAIL_USERNAME"),
            password: var("MAIL_PASSWORD"),
            default_sender: var("MAIL_DEFAULT_SENDER").unwrap_or(defaults.default_sender),
        }
    }
}

/// SMTP when `MAIL_SERVER` is configured, logging otherwise.
pub fn mailer_from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    let Some(server) = &config.server else {
        tracing::warn!("MAIL_SERVER not set; outgoing mail will only be logged");
        return Arc::new(LogMailer);
    };

    match SmtpMailer::new(config) {
        Ok(mailer) => {
            tracing::info!(server = %server, port = config.port, tls = config.use_tls, "SMTP mail configured");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::error!(server = %server, error = %e, "SMTP setup failed; mail will only be logged");
            Arc::new(LogMailer)
        }
    }
}
