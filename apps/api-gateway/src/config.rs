//! Gateway configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use url::Url;

use bookstore_infra::auth::secret_from_env;
use bookstore_infra::{JwtConfig, MailConfig, UpstreamTarget};
use bookstore_web::parse_origins;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

/// Settings for the email verification link flow.
#[derive(Debug, Clone)]
pub struct VerificationSettings {
    pub secret_key: String,
    pub token_ttl: chrono::Duration,
    /// Externally reachable gateway base, used to build links in emails.
    pub public_url: String,
    pub success_url: String,
    pub failure_url: String,
}

/// The four backend services.
#[derive(Debug, Clone)]
pub struct Upstreams {
    pub users: UpstreamTarget,
    pub catalog: UpstreamTarget,
    pub orders: UpstreamTarget,
    pub payments: UpstreamTarget,
}

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub upstreams: Upstreams,
    pub cors_origins: Vec<String>,
    pub jwt: JwtConfig,
    pub verification: VerificationSettings,
    pub mail: MailConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let timeout = Duration::from_secs(
            env::var("UPSTREAM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        );
        let upstream = |name: &str, var: &'static str, default: &str| {
            let raw = env::var(var).unwrap_or_else(|_| default.to_string());
            Url::parse(&raw)
                .map(|url| UpstreamTarget::new(name, url, timeout))
                .map_err(|source| ConfigError::InvalidUrl { var, source })
        };
        let upstreams = Upstreams {
            users: upstream("User", "USER_SERVICE_URL", "http://127.0.0.1:5002")?,
            catalog: upstream("Catalog", "CATALOG_SERVICE_URL", "http://127.0.0.1:5003")?,
            orders: upstream("Order", "ORDER_SERVICE_URL", "http://127.0.0.1:5004")?,
            payments: upstream("Payment", "PAYMENT_SERVICE_URL", "http://127.0.0.1:5005")?,
        };

        let verification = VerificationSettings {
            secret_key: secret_from_env(),
            token_ttl: chrono::Duration::seconds(
                env::var("EMAIL_VERIFICATION_TOKEN_EXPIRATION")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(86400),
            ),
            public_url: env::var("GATEWAY_PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://{}:{}", host, port)),
            success_url: env::var("FRONTEND_VERIFICATION_SUCCESS_URL")
                .unwrap_or_else(|_| "http://localhost:3000/verify-success".to_string()),
            failure_url: env::var("FRONTEND_VERIFICATION_FAILURE_URL")
                .unwrap_or_else(|_| "http://localhost:3000/verify-failure".to_string()),
        };

        Ok(Self {
            upstreams,
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            jwt: JwtConfig::from_env(),
            verification,
            mail: MailConfig::from_env(),
            host,
            port,
        })
    }
}
