//! # Bookstore API Gateway
//!
//! Single public entry point. Proxies `/users`, `/catalog`, `/orders` and
//! `/payments` to their backends and runs the account workflows itself.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use bookstore_core::ports::TokenService;
use bookstore_infra::JwtTokenService;
use bookstore_web::{RequestIdMiddleware, TelemetryConfig, cors, init_telemetry, json_config};

mod config;
mod handlers;
mod middleware;
mod state;
#[cfg(test)]
mod testing;

use config::GatewayConfig;
use state::GatewayState;

/// Proxied bodies may be larger than actix's 256 KiB default.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env("api-gateway"));

    let config = GatewayConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    tracing::info!(
        users = %config.upstreams.users.base_url,
        catalog = %config.upstreams.catalog.base_url,
        orders = %config.upstreams.orders.base_url,
        payments = %config.upstreams.payments.base_url,
        "Starting API Gateway on {}:{}",
        config.host,
        config.port
    );

    let state = GatewayState::from_config(&config).map_err(std::io::Error::other)?;
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let origins = config.cors_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors(&origins))
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .app_data(json_config())
            .app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
