//! Catalog service configuration loaded from environment variables.

use std::env;

use bookstore_infra::DatabaseConfig;
use bookstore_web::parse_origins;

#[derive(Debug, Clone)]
pub struct CatalogServiceConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub cors_origins: Vec<String>,
}

impl CatalogServiceConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5003),
            database: DatabaseConfig::from_env("sqlite://catalog.db?mode=rwc"),
            cors_origins: parse_origins(
                &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5000".to_string()),
            ),
        }
    }
}
