//! Catch-all proxy routes and the actix <-> forwarder conversions.

use actix_web::http::header::{self as actix_header, HeaderName, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, guard, web};
use http::header as upstream_header;

use bookstore_core::ports::{ForwardOverrides, ProxiedRequest, ProxiedResponse, ProxyBody};
use bookstore_web::AppResult;

use crate::state::{Backend, GatewayState};

/// Route every GET/POST/PUT/DELETE under the current scope to its backend.
/// `/<prefix>/<tail>` is forwarded to `<backend>/<tail>`.
pub fn catch_all(cfg: &mut web::ServiceConfig) {
    let methods = || {
        guard::Any(guard::Get())
            .or(guard::Post())
            .or(guard::Put())
            .or(guard::Delete())
    };

    cfg.route("", web::route().guard(methods()).to(forward))
        .route("/{tail:.*}", web::route().guard(methods()).to(forward));
}

pub async fn forward(
    req: HttpRequest,
    body: web::Bytes,
    backend: web::Data<Backend>,
    state: web::Data<GatewayState>,
) -> AppResult<HttpResponse> {
    let tail = req.match_info().get("tail").unwrap_or_default();
    let request = proxied_request(&req, &body);

    let response = state
        .forwarder(**backend)
        .forward(tail, &request, ForwardOverrides::default())
        .await?;

    Ok(relay(response))
}

/// Method, query and headers of the inbound request, without a body.
///
/// `content-encoding` is dropped: actix has already decompressed the payload.
pub fn inbound(req: &HttpRequest) -> ProxiedRequest {
    let method = http::Method::from_bytes(req.method().as_str().as_bytes())
        .unwrap_or(http::Method::GET);

    let mut headers = http::HeaderMap::with_capacity(req.headers().len());
    for (name, value) in req.headers() {
        if *name == actix_header::CONTENT_ENCODING {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            upstream_header::HeaderName::from_bytes(name.as_str().as_bytes()),
            upstream_header::HeaderValue::from_bytes(value.as_bytes()),
        ) {
            headers.append(name, value);
        }
    }

    let mut request = ProxiedRequest::new(method, headers);
    let query = req.query_string();
    if !query.is_empty() {
        request.query = Some(query.to_string());
    }
    request
}

/// The inbound request with its body decoded by content type.
pub fn proxied_request(req: &HttpRequest, body: &[u8]) -> ProxiedRequest {
    let mut request = inbound(req);
    request.body = decode_body(req, body);
    request
}

fn decode_body(req: &HttpRequest, body: &[u8]) -> ProxyBody {
    if body.is_empty() {
        return ProxyBody::Empty;
    }

    let content_type = req
        .headers()
        .get(actix_header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let mime = content_type.split(';').next().unwrap_or_default().trim();

    if mime == "application/json" || mime.ends_with("+json") {
        // Undecodable JSON is passed through for the backend to reject.
        if let Ok(value) = serde_json::from_slice(body) {
            return ProxyBody::Json(value);
        }
    } else if mime == "application/x-www-form-urlencoded" {
        let fields = url::form_urlencoded::parse(body).into_owned().collect();
        return ProxyBody::Form(fields);
    }

    ProxyBody::Raw(body.to_vec())
}

/// Turn the backend's answer into the client response, byte for byte.
pub fn relay(response: ProxiedResponse) -> HttpResponse {
    let status = StatusCode::from_u16(response.status.as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_str().as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            builder.append_header((name, value));
        }
    }

    builder.body(response.body)
}
