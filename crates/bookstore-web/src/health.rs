//! Service home endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

/// Identity reported by `GET /`.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Human-readable name, e.g. `API Gateway`.
    pub name: &'static str,
    pub version: &'static str,
}

impl ServiceInfo {
    pub fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

#[derive(Serialize)]
struct HomeResponse {
    message: String,
    status: &'static str,
    version: &'static str,
}

/// GET /
pub async fn home(info: web::Data<ServiceInfo>) -> HttpResponse {
    HttpResponse::Ok().json(HomeResponse {
        message: format!("{} is running!", info.name),
        status: "OK",
        version: info.version,
    })
}
