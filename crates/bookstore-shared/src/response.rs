//! Response bodies produced by the gateway and the services themselves.
//!
//! Errors raised locally use RFC 7807 problem details. Backend error bodies
//! are relayed untouched and never pass through these types.

use serde::{Deserialize, Serialize};

/// `{"message": "..."}`, the acknowledgement body used across the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Problem details body.
///
/// `detail` holds the human-readable reason clients match on, e.g.
/// `"Email not verified"` on a refused login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Echo of `X-Request-ID` so a client report can be traced in the logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.into(),
            status,
            detail: None,
            request_id: None,
        }
    }

    fn described(status: u16, title: &str, detail: impl Into<String>) -> Self {
        Self::new(status, title).with_detail(detail)
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..self
        }
    }

    pub fn with_request_id(self, request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..self
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::described(400, "Bad Request", detail)
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::described(401, "Unauthorized", detail)
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::described(403, "Forbidden", detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::described(404, "Not Found", detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::described(409, "Conflict", detail)
    }

    /// No detail: internal causes stay in the logs.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
