//! Payment service state.

use std::sync::Arc;

use sea_orm::DbErr;

use bookstore_core::ports::{PaymentOutcomeDecider, PaymentRepository};
use bookstore_infra::RandomOutcomeDecider;
use bookstore_infra::database::{SqlPaymentRepository, connect, init_payment_schema};

use crate::config::PaymentServiceConfig;

#[derive(Clone)]
pub struct PaymentState {
    pub payments: Arc<dyn PaymentRepository>,
    pub decider: Arc<dyn PaymentOutcomeDecider>,
}

impl PaymentState {
    pub async fn init(config: &PaymentServiceConfig) -> Result<Self, DbErr> {
        let db = connect(&config.database).await?;
        init_payment_schema(&db).await?;

        tracing::info!(
            success_rate = config.success_rate,
            "Payment service state initialized"
        );
        Ok(Self {
            payments: Arc::new(SqlPaymentRepository::new(db)),
            decider: Arc::new(RandomOutcomeDecider::new(config.success_rate)),
        })
    }
}
