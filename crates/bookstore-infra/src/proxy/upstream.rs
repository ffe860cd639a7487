//! reqwest-based [`Forwarder`] for one backend service.

use std::time::Duration;

use async_trait::async_trait;
use http::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use url::Url;

use bookstore_core::ports::{
    ForwardOverrides, Forwarder, ProxiedRequest, ProxiedResponse, ProxyBody, ProxyError,
};

/// Request headers that must not be replayed upstream. Bodies reach the
/// forwarder already decompressed, so `content-encoding` no longer applies.
const STRIPPED_REQUEST_HEADERS: [header::HeaderName; 5] = [
    header::HOST,
    header::CONTENT_LENGTH,
    header::CONTENT_ENCODING,
    header::CONNECTION,
    header::TRANSFER_ENCODING,
];

/// Response headers describing the upstream connection rather than the body.
const STRIPPED_RESPONSE_HEADERS: [header::HeaderName; 4] = [
    header::CONTENT_ENCODING,
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

/// One configured backend.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    /// Display name used in error messages, e.g. `User`.
    pub name: String,
    pub base_url: Url,
    pub timeout: Duration,
}

impl UpstreamTarget {
    pub fn new(name: impl Into<String>, base_url: Url, timeout: Duration) -> Self {
        Self {
            name: name.into(),
            base_url,
            timeout,
        }
    }
}

/// Forwards requests to a single [`UpstreamTarget`]. Redirects are returned
/// to the caller, never followed.
pub struct HttpForwarder {
    target: UpstreamTarget,
    client: reqwest::Client,
}

impl HttpForwarder {
    pub fn new(target: UpstreamTarget) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(target.timeout)
            .build()?;

        Ok(Self { target, client })
    }

    fn url_for(&self, path: &str, query: Option<&str>) -> String {
        let base = self.target.base_url.as_str().trim_end_matches('/');
        let mut url = format!("{}/{}", base, path.trim_start_matches('/'));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        url
    }

    fn map_error(&self, err: reqwest::Error) -> ProxyError {
        let service = self.target.name.clone();
        if err.is_connect() {
            tracing::error!(service = %service, error = %err, "Upstream unreachable");
            ProxyError::Unavailable { service }
        } else if err.is_timeout() {
            tracing::error!(service = %service, error = %err, "Upstream timed out");
            ProxyError::Timeout { service }
        } else {
            tracing::error!(service = %service, error = %err, "Upstream transport error");
            ProxyError::Transport {
                service,
                message: err.to_string(),
            }
        }
    }
}

/// Choose exactly one body: json override > form override > inbound body.
fn select_body(
    request: &ProxiedRequest,
    overrides: &ForwardOverrides,
) -> Result<(Option<HeaderValue>, Vec<u8>), serde_json::Error> {
    let json_type = || HeaderValue::from_static("application/json");
    let form_type = || HeaderValue::from_static("application/x-www-form-urlencoded");
    let encode_form = |fields: &[(String, String)]| -> Vec<u8> {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish()
            .into_bytes()
    };

    if let Some(json) = &overrides.json {
        return Ok((Some(json_type()), serde_json::to_vec(json)?));
    }
    if let Some(form) = &overrides.form {
        return Ok((Some(form_type()), encode_form(form)));
    }
    Ok(match &request.body {
        ProxyBody::Json(value) => (Some(json_type()), serde_json::to_vec(value)?),
        ProxyBody::Form(fields) => (Some(form_type()), encode_form(fields)),
        ProxyBody::Raw(bytes) => (None, bytes.clone()),
        ProxyBody::Empty => (None, Vec::new()),
    })
}

#[async_trait]
impl Forwarder for HttpForwarder {
    fn service_name(&self) -> &str {
        &self.target.name
    }

    async fn forward(
        &self,
        path: &str,
        request: &ProxiedRequest,
        overrides: ForwardOverrides,
    ) -> Result<ProxiedResponse, ProxyError> {
        let method = overrides
            .method
            .clone()
            .unwrap_or_else(|| request.method.clone());
        let url = self.url_for(path, request.query.as_deref());

        let mut headers = request.headers.clone();
        for name in &STRIPPED_REQUEST_HEADERS {
            headers.remove(name);
        }

        let (content_type, body) =
            select_body(request, &overrides).map_err(|e| ProxyError::Transport {
                service: self.target.name.clone(),
                message: e.to_string(),
            })?;
        if let Some(content_type) = content_type {
            headers.remove(header::CONTENT_TYPE);
            headers.insert(header::CONTENT_TYPE, content_type);
        }

        tracing::debug!(
            service = %self.target.name,
            method = %method,
            url = %url,
            "Forwarding request"
        );

        let response = self
            .client
            .request(method, &url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        let mut response_headers: HeaderMap = response.headers().clone();
        for name in &STRIPPED_RESPONSE_HEADERS {
            response_headers.remove(name);
        }
        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        tracing::debug!(service = %self.target.name, status = %status, "Upstream responded");

        Ok(ProxiedResponse {
            status,
            headers: response_headers,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
    use http::Method;
    use serde_json::json;

    use super::*;

    /// Echoes the method, path, query, selected headers and body.
    async fn echo(req: HttpRequest, body: web::Bytes) -> HttpResponse {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        HttpResponse::Ok()
            .insert_header(("x-upstream", "yes"))
            .json(json!({
                "method": req.method().as_str(),
                "path": req.path(),
                "query": req.query_string(),
                "host": header("host"),
                "cookie": header("cookie"),
                "content_type": header("content-type"),
                "content_encoding": header("content-encoding"),
                "body": String::from_utf8_lossy(&body),
            }))
    }

    async fn start_upstream() -> Url {
        let server = HttpServer::new(|| {
            App::new()
                .route(
                    "/slow",
                    web::get().to(|| async {
                        actix_web::rt::time::sleep(Duration::from_secs(2)).await;
                        HttpResponse::Ok().finish()
                    }),
                )
                .route(
                    "/moved",
                    web::get().to(|| async {
                        HttpResponse::Found()
                            .insert_header(("location", "/elsewhere"))
                            .finish()
                    }),
                )
                .default_service(web::to(echo))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        Url::parse(&format!("http://{}/", addr)).unwrap()
    }

    fn forwarder(base_url: Url, timeout: Duration) -> HttpForwarder {
        HttpForwarder::new(UpstreamTarget::new("Catalog", base_url, timeout)).unwrap()
    }

    fn get_request() -> ProxiedRequest {
        ProxiedRequest::new(Method::GET, HeaderMap::new())
    }

    #[actix_web::test]
    async fn test_unreachable_backend_is_unavailable() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
        let forwarder = forwarder(base, Duration::from_secs(5));

        let err = forwarder
            .forward("catalog", &get_request(), ForwardOverrides::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProxyError::Unavailable {
                service: "Catalog".to_string()
            }
        );
        assert!(err.to_string().starts_with("Catalog service"));
    }

    #[actix_web::test]
    async fn test_slow_backend_times_out() {
        let forwarder = forwarder(start_upstream().await, Duration::from_millis(200));

        let err = forwarder
            .forward("slow", &get_request(), ForwardOverrides::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ProxyError::Timeout { .. }));
    }

    #[actix_web::test]
    async fn test_forward_preserves_path_query_and_cookies() {
        let forwarder = forwarder(start_upstream().await, Duration::from_secs(5));
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("gateway.local"));
        headers.insert(header::COOKIE, HeaderValue::from_static("session=abc"));
        let mut request = ProxiedRequest::new(Method::DELETE, headers);
        request.query = Some("page=2&q=dune".to_string());

        let response = forwarder
            .forward("catalog/3", &request, ForwardOverrides::default())
            .await
            .unwrap();

        assert!(response.is_success());
        assert!(response.headers.get(header::CONTENT_LENGTH).is_none());
        assert_eq!(response.headers.get("x-upstream").unwrap(), "yes");
        let echoed = response.json().unwrap();
        assert_eq!(echoed["method"], "DELETE");
        assert_eq!(echoed["path"], "/catalog/3");
        assert_eq!(echoed["query"], "page=2&q=dune");
        assert_eq!(echoed["cookie"], "session=abc");
        assert_ne!(echoed["host"], "gateway.local");
    }

    #[actix_web::test]
    async fn test_redirects_are_not_followed() {
        let forwarder = forwarder(start_upstream().await, Duration::from_secs(5));

        let response = forwarder
            .forward("moved", &get_request(), ForwardOverrides::default())
            .await
            .unwrap();

        assert_eq!(response.status, http::StatusCode::FOUND);
        assert_eq!(response.headers.get(header::LOCATION).unwrap(), "/elsewhere");
    }

    #[actix_web::test]
    async fn test_json_override_wins_over_inbound_form() {
        let forwarder = forwarder(start_upstream().await, Duration::from_secs(5));
        let mut request = ProxiedRequest::new(Method::POST, HeaderMap::new());
        request.body = ProxyBody::Form(vec![("email".to_string(), "a@b.com".to_string())]);

        let overrides = ForwardOverrides::default()
            .method(Method::PUT)
            .json(json!({"is_verified": true}));
        let response = forwarder
            .forward("users/4/verify", &request, overrides)
            .await
            .unwrap();

        let echoed = response.json().unwrap();
        assert_eq!(echoed["method"], "PUT");
        assert_eq!(echoed["content_type"], "application/json");
        assert_eq!(echoed["body"], r#"{"is_verified":true}"#);
    }

    #[actix_web::test]
    async fn test_inbound_form_is_reencoded() {
        let forwarder = forwarder(start_upstream().await, Duration::from_secs(5));
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
        );
        let mut request = ProxiedRequest::new(Method::POST, headers);
        request.body = ProxyBody::Form(vec![
            ("username".to_string(), "jane doe".to_string()),
            ("email".to_string(), "jane@example.com".to_string()),
        ]);

        let response = forwarder
            .forward("users", &request, ForwardOverrides::default())
            .await
            .unwrap();

        let echoed = response.json().unwrap();
        assert_eq!(echoed["content_type"], "application/x-www-form-urlencoded");
        assert_eq!(echoed["body"], "username=jane+doe&email=jane%40example.com");
    }

    #[actix_web::test]
    async fn test_decoded_body_loses_its_content_encoding() {
        let forwarder = forwarder(start_upstream().await, Duration::from_secs(5));
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut request = ProxiedRequest::new(Method::PUT, headers);
        request.body = ProxyBody::Json(json!({"price": 12.5}));

        let response = forwarder
            .forward("catalog/3", &request, ForwardOverrides::default())
            .await
            .unwrap();

        assert!(response.is_success());
        let echoed = response.json().unwrap();
        assert!(echoed["content_encoding"].is_null());
        assert_eq!(echoed["body"], r#"{"price":12.5}"#);
    }

    #[test]
    fn test_url_joining() {
        let forwarder = forwarder(
            Url::parse("http://users.internal:5002/").unwrap(),
            Duration::from_secs(1),
        );
        assert_eq!(
            forwarder.url_for("users/4", Some("")),
            "http://users.internal:5002/users/4"
        );
        assert_eq!(
            forwarder.url_for("", Some("a=1")),
            "http://users.internal:5002/?a=1"
        );
    }
}
