//! HTTP handlers and route configuration.

mod account;
mod users;

use actix_web::web;

use bookstore_core::domain::User;
use bookstore_web::{AppError, AppResult, ServiceInfo, home};

use crate::state::UserState;

/// Configure all user service routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::Data::new(ServiceInfo::new(
        "User Service",
        env!("CARGO_PKG_VERSION"),
    )))
    .route("/", web::get().to(home))
    .route("/login", web::post().to(account::login))
    .route(
        "/request-password-reset",
        web::post().to(account::request_password_reset),
    )
    .route("/reset-password", web::post().to(account::reset_password))
    .service(
        web::scope("/users")
            .route("", web::post().to(users::create_user))
            .route("", web::get().to(users::list_users))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::put().to(users::update_user))
            .route("/{id}", web::delete().to(users::delete_user))
            .route("/{id}/password", web::put().to(account::change_password))
            .route("/{id}/verify", web::put().to(account::set_verified)),
    );
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

async fn find_user(state: &UserState, id: i32) -> AppResult<User> {
    state.users.find_by_id(id).await?.ok_or_else(user_not_found)
}
