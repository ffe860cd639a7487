//! Test wiring over in-memory SQLite.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};

use bookstore_infra::DatabaseConfig;
use bookstore_infra::database::{SqlCatalogRepository, connect, init_catalog_schema};
use bookstore_web::json_config;

use crate::handlers::configure_routes;
use crate::state::CatalogState;

pub async fn test_state() -> CatalogState {
    let db = connect(&DatabaseConfig::in_memory()).await.unwrap();
    init_catalog_schema(&db).await.unwrap();
    CatalogState {
        catalog: Arc::new(SqlCatalogRepository::new(db)),
    }
}

pub fn test_app(
    state: CatalogState,
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
