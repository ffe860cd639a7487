//! Gateway state - shared across all handlers.

use std::sync::Arc;

use bookstore_core::ports::{Forwarder, Mailer};
use bookstore_infra::{HttpForwarder, mailer_from_config};

use crate::config::{GatewayConfig, VerificationSettings};

/// Which backend a proxy scope talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Users,
    Catalog,
    Orders,
    Payments,
}

/// Shared gateway state.
#[derive(Clone)]
pub struct GatewayState {
    pub users: Arc<dyn Forwarder>,
    pub catalog: Arc<dyn Forwarder>,
    pub orders: Arc<dyn Forwarder>,
    pub payments: Arc<dyn Forwarder>,
    pub mailer: Arc<dyn Mailer>,
    pub verification: VerificationSettings,
}

impl GatewayState {
    /// Build one forwarder per configured backend.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let forwarder = |target: &bookstore_infra::UpstreamTarget| {
            HttpForwarder::new(target.clone()).map(|f| Arc::new(f) as Arc<dyn Forwarder>)
        };

        let state = Self {
            users: forwarder(&config.upstreams.users)?,
            catalog: forwarder(&config.upstreams.catalog)?,
            orders: forwarder(&config.upstreams.orders)?,
            payments: forwarder(&config.upstreams.payments)?,
            mailer: mailer_from_config(&config.mail),
            verification: config.verification.clone(),
        };

        tracing::info!("Gateway state initialized");
        Ok(state)
    }

    pub fn forwarder(&self, backend: Backend) -> &Arc<dyn Forwarder> {
        match backend {
            Backend::Users => &self.users,
            Backend::Catalog => &self.catalog,
            Backend::Orders => &self.orders,
            Backend::Payments => &self.payments,
        }
    }
}
