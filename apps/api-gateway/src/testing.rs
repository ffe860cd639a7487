//! In-process doubles for gateway handler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, Error, web};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::Value;

use bookstore_core::ports::{
    ForwardOverrides, Forwarder, MailError, MailMessage, Mailer, ProxiedRequest, ProxiedResponse,
    ProxyBody, ProxyError, TokenService,
};
use bookstore_infra::{JwtConfig, JwtTokenService};
use bookstore_web::json_config;

use crate::config::VerificationSettings;
use crate::handlers::configure_routes;
use crate::state::GatewayState;

pub const TEST_SECRET: &str = "gateway-test-secret";
pub const SUCCESS_URL: &str = "http://frontend.test/verify-success";
pub const FAILURE_URL: &str = "http://frontend.test/verify-failure";

/// One call seen by a [`RecordingForwarder`], with overrides applied.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub request: ProxiedRequest,
}

/// Records every call and answers from a queue of canned responses
/// (an empty `200 {}` once the queue runs dry).
pub struct RecordingForwarder {
    name: String,
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<ProxiedResponse, ProxyError>>>,
}

impl RecordingForwarder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        }
    }

    pub fn respond_with(&self, status: u16, body: Value) {
        self.respond_with_headers(status, body, &[]);
    }

    pub fn respond_with_headers(&self, status: u16, body: Value, headers: &[(&str, &str)]) {
        let mut map = HeaderMap::new();
        map.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in headers {
            map.append(
                http::header::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        self.responses.lock().unwrap().push_back(Ok(ProxiedResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: map,
            body: serde_json::to_vec(&body).unwrap(),
        }));
    }

    pub fn fail_with(&self, err: ProxyError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Forwarder for RecordingForwarder {
    fn service_name(&self) -> &str {
        &self.name
    }

    async fn forward(
        &self,
        path: &str,
        request: &ProxiedRequest,
        overrides: ForwardOverrides,
    ) -> Result<ProxiedResponse, ProxyError> {
        let mut request = request.clone();
        if let Some(method) = overrides.method {
            request.method = method;
        }
        if let Some(json) = overrides.json {
            request.body = ProxyBody::Json(json);
        } else if let Some(form) = overrides.form {
            request.body = ProxyBody::Form(form);
        }
        self.calls.lock().unwrap().push(RecordedCall {
            path: path.to_string(),
            request,
        });

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ProxiedResponse {
                    status: StatusCode::OK,
                    headers: HeaderMap::new(),
                    body: b"{}".to_vec(),
                })
            })
    }
}

/// Collects messages; fails every send when `failing`.
#[derive(Default)]
pub struct FakeMailer {
    pub failing: bool,
    sent: Mutex<Vec<MailMessage>>,
}

impl FakeMailer {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        if self.failing {
            return Err(MailError::Delivery("relay offline".to_string()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// A gateway wired to recording forwarders.
pub struct TestGateway {
    pub users: Arc<RecordingForwarder>,
    pub catalog: Arc<RecordingForwarder>,
    pub orders: Arc<RecordingForwarder>,
    pub payments: Arc<RecordingForwarder>,
    pub mailer: Arc<FakeMailer>,
    pub tokens: Arc<dyn TokenService>,
}

impl TestGateway {
    pub fn new() -> Self {
        Self::with_users(Arc::new(RecordingForwarder::new("User")))
    }

    pub fn with_users(users: Arc<RecordingForwarder>) -> Self {
        Self {
            users,
            catalog: Arc::new(RecordingForwarder::new("Catalog")),
            orders: Arc::new(RecordingForwarder::new("Order")),
            payments: Arc::new(RecordingForwarder::new("Payment")),
            mailer: Arc::new(FakeMailer::default()),
            tokens: Arc::new(JwtTokenService::new(JwtConfig {
                secret: "jwt-test-secret".to_string(),
                expiration_hours: 1,
                issuer: "bookstore-test".to_string(),
            })),
        }
    }

    pub fn with_mailer(mut self, mailer: FakeMailer) -> Self {
        self.mailer = Arc::new(mailer);
        self
    }

    pub fn verification(&self) -> VerificationSettings {
        VerificationSettings {
            secret_key: TEST_SECRET.to_string(),
            token_ttl: chrono::Duration::hours(24),
            public_url: "http://gateway.test".to_string(),
            success_url: SUCCESS_URL.to_string(),
            failure_url: FAILURE_URL.to_string(),
        }
    }

    pub fn state(&self) -> GatewayState {
        GatewayState {
            users: self.users.clone(),
            catalog: self.catalog.clone(),
            orders: self.orders.clone(),
            payments: self.payments.clone(),
            mailer: self.mailer.clone(),
            verification: self.verification(),
        }
    }

    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(json_config())
            .app_data(web::Data::new(self.state()))
            .app_data(web::Data::new(self.tokens.clone()))
            .configure(configure_routes)
    }
}
