//! Test wiring over in-memory SQLite.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use bookstore_infra::DatabaseConfig;
use bookstore_infra::database::{SqlOrderRepository, connect, init_order_schema};
use bookstore_web::json_config;

use crate::handlers::configure_routes;
use crate::state::OrderState;

pub async fn test_state() -> OrderState {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    init_order_schema(&db).await.unwrap();
    OrderState {
        orders: Arc::new(SqlOrderRepository::new(db)),
    }
}

pub fn test_app(
    state: OrderState,
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
