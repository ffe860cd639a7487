//! User service state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DbErr;

use bookstore_core::ports::{Mailer, PasswordService, UserRepository};
use bookstore_infra::database::{SqlUserRepository, connect, init_user_schema};
use bookstore_infra::{Argon2PasswordService, mailer_from_config};

use crate::config::{ResetSettings, UserServiceConfig};

#[derive(Clone)]
pub struct UserState {
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
    pub mailer: Arc<dyn Mailer>,
    pub reset: ResetSettings,
}

impl UserState {
    /// Connect to the database, create the `users` table if needed and
    /// wire the Argon2 hasher and configured mailer.
    pub async fn init(config: &UserServiceConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;
        init_user_schema(&db).await?;

        let state = Self {
            users: Arc::new(SqlUserRepository::new(db)),
            passwords: Arc::new(Argon2PasswordService::new()),
            mailer: mailer_from_config(&config.mail),
            reset: config.reset.clone(),
        };

        tracing::info!("User service state initialized");
        Ok(state)
    }
}
