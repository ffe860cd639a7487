//! CORS policy built from the configured origin list.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Allow the given origins (or any origin for `*`) with credentials.
pub fn cors(origins: &[String]) -> Cors {
    let base = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(super::REQUEST_ID_HEADER),
        ])
        .expose_headers([super::REQUEST_ID_HEADER])
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return base.allow_any_origin().send_wildcard();
    }

    origins
        .iter()
        .fold(base.supports_credentials(), |cors, origin| {
            cors.allowed_origin(origin)
        })
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
