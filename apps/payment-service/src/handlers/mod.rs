//! HTTP handlers and route configuration.

mod payments;

use actix_web::web;

use bookstore_web::{ServiceInfo, home};

/// Configure all payment service routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ServiceInfo::new(
        "Payment Service",
        env!("CARGO_PKG_VERSION"),
    )))
    .route("/", web::get().to(home))
    .service(
        web::scope("/payments")
            .route("", web::post().to(payments::create_payment))
            .route("", web::get().to(payments::list_payments))
            .route(
                "/order/{order_id}",
                web::get().to(payments::payments_for_order),
            )
            .route("/{id}", web::get().to(payments::get_payment))
            .route("/{id}", web::delete().to(payments::delete_payment))
            .route("/{id}/status", web::put().to(payments::update_payment_status)),
    );
}
