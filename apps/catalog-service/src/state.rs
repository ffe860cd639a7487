//! Catalog service state.

use std::sync::Arc;

use sea_orm::DbErr;

use bookstore_core::ports::CatalogRepository;
use bookstore_infra::database::{SqlCatalogRepository, connect, init_catalog_schema};

use crate::config::CatalogServiceConfig;

#[derive(Clone)]
pub struct CatalogState {
    pub catalog: Arc<dyn CatalogRepository>,
}

impl CatalogState {
    pub async fn init(config: &CatalogServiceConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;
        init_catalog_schema(&db).await?;

        tracing::info!("Catalog service state initialized");
        Ok(Self {
            catalog: Arc::new(SqlCatalogRepository::new(db)),
        })
    }
}
