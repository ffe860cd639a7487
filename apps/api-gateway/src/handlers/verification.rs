//! Email verification link handler.

use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use http::{Method, StatusCode};
use serde_json::json;

use bookstore_core::ports::{ForwardOverrides, TokenError, TokenPurpose};
use bookstore_infra::auth::verify_token;

use super::proxy::inbound;
use crate::state::GatewayState;

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// `failure_url` with `error=<tag>` appended to its query.
fn failure_redirect(failure_url: &str, tag: &str) -> HttpResponse {
    let separator = if failure_url.contains('?') { '&' } else { '?' };
    redirect(&format!("{failure_url}{separator}error={tag}"))
}

/// GET /users/verify-email/{token}
///
/// Always answers with a redirect to the configured frontend pages.
pub async fn verify_email(
    req: HttpRequest,
    token: web::Path<String>,
    state: web::Data<GatewayState>,
) -> HttpResponse {
    let settings = &state.verification;

    let payload = match verify_token(&settings.secret_key, &token, TokenPurpose::EmailVerification)
    {
        Ok(payload) => payload,
        Err(TokenError::Expired) => {
            tracing::warn!("Expired email verification token received");
            return failure_redirect(&settings.failure_url, "expired_token");
        }
        Err(TokenError::Invalid(reason)) => {
            tracing::warn!(%reason, "Invalid email verification token received");
            return failure_redirect(&settings.failure_url, "invalid_token");
        }
        Err(TokenError::Internal(reason)) => {
            tracing::error!(%reason, "Error loading verification token");
            return failure_redirect(&settings.failure_url, "internal_error");
        }
    };

    let user_id = payload.subject_id;
    let overrides = ForwardOverrides::default()
        .method(Method::PUT)
        .json(json!({"is_verified": true}));
    let result = state
        .users
        .forward(&format!("users/{user_id}/verify"), &inbound(&req), overrides)
        .await;

    match result {
        Ok(response) if response.status == StatusCode::OK => {
            tracing::info!(user_id, "User email successfully verified");
            redirect(&settings.success_url)
        }
        Ok(response) => {
            tracing::error!(
                user_id,
                status = %response.status,
                body = %String::from_utf8_lossy(&response.body),
                "User service failed to verify user"
            );
            failure_redirect(&settings.failure_url, "service_error")
        }
        Err(e) => {
            tracing::error!(user_id, error = %e, "User service unreachable during verification");
            failure_redirect(&settings.failure_url, "service_error")
        }
    }
}
