//! # Bookstore User Service
//!
//! Owns user accounts: profile CRUD, credential checks, password changes
//! and resets, and the email-verified flag.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use bookstore_web::{RequestIdMiddleware, TelemetryConfig, cors, init_telemetry, json_config};

mod config;
mod handlers;
mod state;
#[cfg(test)]
mod testing;

use config::UserServiceConfig;
use state::UserState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env("user-service"));

    let config = UserServiceConfig::from_env();
    tracing::info!(
        "Starting User Service on {}:{}",
        config.host,
        config.port
    );

    let state = UserState::init(&config)
        .await
        .map_err(std::io::Error::other)?;
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(json_config())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
