//! Request forwarding port used by the gateway.

use async_trait::async_trait;
use http::{HeaderMap, Method, StatusCode};
use serde_json::Value;

/// Body of an inbound request, decoded once by content type.
/// Exactly one representation is forwarded.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProxyBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    /// Anything else (multipart uploads included) passes through untouched.
    Raw(Vec<u8>),
}

/// An inbound request as seen by the forwarder. Cookies travel in the
/// `Cookie` header.
#[derive(Debug, Clone)]
pub struct ProxiedRequest {
    pub method: Method,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: ProxyBody,
}

impl ProxiedRequest {
    /// A bodiless request carrying only the inbound headers.
    pub fn new(method: Method, headers: HeaderMap) -> Self {
        Self {
            method,
            query: None,
            headers,
            body: ProxyBody::Empty,
        }
    }
}

/// The backend's answer, relayed verbatim minus hop-by-hop headers.
#[derive(Debug, Clone)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ProxiedResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decode the body as JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Per-call adjustments made by orchestrators on derived calls.
///
/// Body precedence: `json` > `form` > inbound body.
#[derive(Debug, Clone, Default)]
pub struct ForwardOverrides {
    pub method: Option<Method>,
    pub json: Option<Value>,
    pub form: Option<Vec<(String, String)>>,
}

impl ForwardOverrides {
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn form(mut self, fields: Vec<(String, String)>) -> Self {
        self.form = Some(fields);
        self
    }
}

/// Relays requests to one configured backend. Stateless; never retries.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Display name of the backend, e.g. `User`.
    fn service_name(&self) -> &str;

    /// Forward `request` to `<base_url>/<path>`.
    async fn forward(
        &self,
        path: &str,
        request: &ProxiedRequest,
        overrides: ForwardOverrides,
    ) -> Result<ProxiedResponse, ProxyError>;
}

/// Transport-level forwarding failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    #[error("{service} service is currently unavailable. Please try again later.")]
    Unavailable { service: String },

    #[error("{service} service did not respond in time.")]
    Timeout { service: String },

    #[error("An error occurred while communicating with the {service} service: {message}")]
    Transport { service: String, message: String },
}
