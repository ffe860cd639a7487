//! Structured logging for every bookstore binary.

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// How a binary writes its logs.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// One JSON object per line instead of human-readable output.
    pub json_logs: bool,
    pub service_name: String,
}

impl TelemetryConfig {
    /// `LOG_FORMAT=json` switches to JSON lines.
    pub fn from_env(service_name: &str) -> Self {
        let json_logs = matches!(
            std::env::var("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase).as_deref(),
            Ok("json")
        );
        Self {
            json_logs,
            service_name: service_name.to_string(),
        }
    }

    /// Debug for the binary itself and the shared adapters, info elsewhere.
    fn default_directives(&self) -> String {
        let crate_name = self.service_name.replace('-', "_");
        format!("info,{crate_name}=debug,bookstore_infra=debug")
    }
}

/// Install the global subscriber. `RUST_LOG` replaces the default directives.
pub fn init_telemetry(config: &TelemetryConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let json = config.json_logs.then(|| fmt::layer().json());
    let text = (!config.json_logs).then(|| fmt::layer().compact());

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();

    tracing::info!(service = %config.service_name, json = config.json_logs, "logging ready");
}
