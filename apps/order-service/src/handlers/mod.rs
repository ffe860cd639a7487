//! HTTP handlers and route configuration.

mod orders;

use actix_web::web;

use bookstore_web::{ServiceInfo, home};

/// Configure all order service routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ServiceInfo::new(
        "Order Service",
        env!("CARGO_PKG_VERSION"),
    )))
    .route("/", web::get().to(home))
    .service(
        web::scope("/orders")
            .route("", web::post().to(orders::create_order))
            .route("", web::get().to(orders::list_orders))
            .route("/{id}", web::get().to(orders::get_order))
            .route("/{id}", web::delete().to(orders::delete_order))
            .route("/{id}/items", web::get().to(orders::list_order_items))
            .route("/{id}/status", web::put().to(orders::update_order_status)),
    );
}
