//! # Bookstore Infrastructure
//!
//! Concrete implementations of the ports defined in `bookstore-core`:
//! SeaORM repositories, JWT and signed tokens, Argon2 hashing, mailers,
//! payment outcome deciders and the reqwest-based upstream forwarder.

pub mod auth;
pub mod database;
pub mod mail;
pub mod payment;
pub mod proxy;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
pub use mail::{LogMailer, MailConfig, SmtpMailer, mailer_from_config};
pub use payment::{FixedOutcomeDecider, RandomOutcomeDecider};
pub use proxy::{HttpForwarder, UpstreamTarget};

/// Mask the local part of an email address for logging.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{}***{}", first, domain),
                _ => format!("***{}", domain),
            }
        }
        None => "***".to_string(),
    }
}
