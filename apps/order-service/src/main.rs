//! # Bookstore Order Service
//!
//! Orders and the line items they own.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use bookstore_web::{RequestIdMiddleware, TelemetryConfig, cors, init_telemetry, json_config};

mod config;
mod handlers;
mod state;
#[cfg(test)]
mod testing;

use config::OrderServiceConfig;
use state::OrderState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env("order-service"));

    let config = OrderServiceConfig::from_env();
    tracing::info!(
        "Starting Order Service on {}:{}",
        config.host,
        config.port
    );

    let state = OrderState::init(&config)
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
