//! HTTP handlers and route configuration.

mod catalog;

use actix_web::web;

use bookstore_web::{ServiceInfo, home};

/// Configure all catalog service routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ServiceInfo::new(
        "Catalog Service",
        env!("CARGO_PKG_VERSION"),
    )))
    .route("/", web::get().to(home))
    .service(
        web::scope("/catalog")
            .route("", web::post().to(catalog::create_item))
            .route("", web::get().to(catalog::list_items))
            .route("/{id}", web::get().to(catalog::get_item))
            .route("/{id}", web::put().to(catalog::update_item))
            .route("/{id}", web::delete().to(catalog::delete_item)),
    );
}
