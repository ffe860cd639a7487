//! User service configuration loaded from environment variables.

use std::env;

use bookstore_infra::auth::secret_from_env;
use bookstore_infra::{DatabaseConfig, MailConfig};
use bookstore_web::parse_origins;

/// Password reset link settings.
#[derive(Debug, Clone)]
pub struct ResetSettings {
    pub secret_key: String,
    pub token_ttl: chrono::Duration,
    /// Frontend page that receives `?token=...`.
    pub reset_url: String,
}

#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub cors_origins: Vec<String>,
    pub reset: ResetSettings,
    pub mail: MailConfig,
}

impl UserServiceConfig {
    pub fn from_env() -> Self {
        let reset = ResetSettings {
            secret_key: secret_from_env(),
            token_ttl: chrono::Duration::seconds(
                env::var("PASSWORD_RESET_TOKEN_EXPIRATION")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3600),
            ),
            reset_url: env::var("PASSWORD_RESET_URL")
                .unwrap_or_else(|_| "http://localhost:3000/reset-password".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5002),
            database: DatabaseConfig::from_env("sqlite://users.db?mode=rwc"),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            ),
            reset,
            mail: MailConfig::from_env(),
        }
    }
}
