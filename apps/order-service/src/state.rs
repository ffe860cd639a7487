//! Order service state.

use std::sync::Arc;

use sea_orm::DbErr;

use bookstore_core::ports::OrderRepository;
use bookstore_infra::database::{SqlOrderRepository, connect, init_order_schema};

use crate::config::OrderServiceConfig;

#[derive(Clone)]
pub struct OrderState {
    pub orders: Arc<dyn OrderRepository>,
}

impl OrderState {
    /// Creates `orders` and `order_items` when missing.
    pub async fn init(config: &OrderServiceConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;
        init_order_schema(&db).await?;

        tracing::info!("Order service state initialized");
        Ok(Self {
            orders: Arc::new(SqlOrderRepository::new(db)),
        })
    }
}
