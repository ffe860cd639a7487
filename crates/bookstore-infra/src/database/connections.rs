use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DbConn, DbErr};

/// Connection pool configuration for a service database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout: Option<Duration>,
}

impl DatabaseConfig {
    /// Read `DATABASE_URL`, `DB_MAX_CONNECTIONS` and `DB_MIN_CONNECTIONS`,
    /// falling back to `default_url`.
    pub fn from_env(default_url: &str) -> Self {
        Self {
            url: std::env::var("DATABASE_URL").unwrap_or_else(|_| default_url.to_string()),
            max_connections: env_u32("DB_MAX_CONNECTIONS", 10),
            min_connections: env_u32("DB_MIN_CONNECTIONS", 1),
            idle_timeout: Some(Duration::from_secs(300)),
        }
    }

    /// A private in-memory SQLite database.
    ///
    /// Every pooled connection would open its own empty database, so the
    /// pool is pinned to a single connection that is never reaped.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout: None,
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Open the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<DbConn, DbErr> {
    tracing::info!("Initializing database connection...");

    let mut opts = ConnectOptions::new(&config.url);
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if let Some(idle) = config.idle_timeout {
        opts.idle_timeout(idle);
    }

    let db = Database::connect(opts).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        "Database connected (pool: {})",
        config.max_connections
    );
    Ok(db)
}
