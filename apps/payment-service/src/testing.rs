//! Test wiring over in-memory SQLite with a fixed payment outcome.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use bookstore_core::domain::PaymentStatus;
use bookstore_infra::database::{SqlPaymentRepository, connect, init_payment_schema};
use bookstore_infra::{DatabaseConfig, FixedOutcomeDecider};
use bookstore_web::json_config;

use crate::handlers::configure_routes;
use crate::state::PaymentState;

pub async fn test_state(outcome: PaymentStatus) -> PaymentState {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    init_payment_schema(&db).await.unwrap();
    PaymentState {
        payments: Arc::new(SqlPaymentRepository::new(db)),
        decider: Arc::new(FixedOutcomeDecider(outcome)),
    }
}

pub fn test_app(
    state: PaymentState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(json_config())
        .app_data(web::Data::new(state))
        .configure(configure_routes)
}
