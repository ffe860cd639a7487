//! HTTP handlers and route configuration.

mod auth;
mod proxy;
mod verification;

use actix_web::web;

use bookstore_web::{ServiceInfo, home};

use crate::state::Backend;

/// Configure all gateway routes. Orchestrated `/users` endpoints are
/// registered ahead of that scope's catch-all proxy.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ServiceInfo::new(
        "API Gateway",
        env!("CARGO_PKG_VERSION"),
    )))
    .route("/", web::get().to(home))
    .service(
        web::scope("/users")
            .app_data(web::Data::new(Backend::Users))
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/forgot-password", web::post().to(auth::forgot_password))
            .route("/reset-password", web::post().to(auth::reset_password))
            .route("/change-password", web::put().to(auth::change_password))
            .route(
                "/verify-email/{token}",
                web::get().to(verification::verify_email),
            )
            .configure(proxy::catch_all),
    )
    .service(
        web::scope("/catalog")
            .app_data(web::Data::new(Backend::Catalog))
            .configure(proxy::catch_all),
    )
    .service(
        web::scope("/orders")
            .app_data(web::Data::new(Backend::Orders))
            .configure(proxy::catch_all),
    )
    .service(
        web::scope("/payments")
            .app_data(web::Data::new(Backend::Payments))
            .configure(proxy::catch_all),
    );
}
