//! # Bookstore Web
//!
//! Actix-web building blocks used by every bookstore binary: RFC 7807 error
//! responses, request IDs, CORS, telemetry setup and the service home route.

pub mod cors;
pub mod error;
pub mod health;
pub mod request_id;
pub mod telemetry;

pub use error::{AppError, AppResult, json_config};
pub use cors::{cors, parse_origins};
pub use health::{ServiceInfo, home};
pub use request_id::{REQUEST_ID_HEADER, RequestId, RequestIdMiddleware};
pub use telemetry::{TelemetryConfig, init_telemetry};
