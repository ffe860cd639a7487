//! Account workflow handlers: registration, login and password management.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use http::{Method, StatusCode};
use serde_json::{Value, json};

use bookstore_core::ports::{
    ForwardOverrides, MailMessage, ProxyBody, TokenPayload, TokenPurpose, TokenService,
};
use bookstore_infra::auth::sign_token;
use bookstore_infra::mask_email;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegistrationResponse, ResetPasswordRequest,
};
use bookstore_web::{AppError, AppResult};

use super::proxy::{inbound, proxied_request, relay};
use crate::middleware::auth::Identity;
use crate::state::GatewayState;

pub const RESET_REQUESTED_MESSAGE: &str =
    "If the email is registered, a password reset link has been sent.";
pub const NOT_VERIFIED_MESSAGE: &str = "Account not verified. Please check your email.";

/// Non-blank string field of a JSON object or form body.
fn body_field<'a>(body: &'a ProxyBody, key: &str) -> Option<&'a str> {
    let value = match body {
        ProxyBody::Json(Value::Object(map)) => map.get(key).and_then(Value::as_str),
        ProxyBody::Form(fields) => fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str()),
        _ => None,
    };
    value.filter(|v| !v.trim().is_empty())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Pull the fields the gateway needs out of the user service's JSON.
fn user_identity(user: &Value) -> Result<(i32, &str, &str), AppError> {
    let id = user
        .get("id")
        .and_then(Value::as_i64)
        .and_then(|id| i32::try_from(id).ok());
    let email = user.get("email").and_then(Value::as_str);
    let role = user
        .get("role")
        .and_then(Value::as_str)
        .unwrap_or("customer");

    match (id, email) {
        (Some(id), Some(email)) => Ok((id, email, role)),
        _ => Err(AppError::Internal(
            "User service returned a user without id or email".to_string(),
        )),
    }
}

/// Mint a verification token and mail the link. Failures are logged and
/// reported as `false`; they never fail the registration.
async fn send_verification_email(state: &GatewayState, user_id: i32, email: &str) -> bool {
    let settings = &state.verification;
    let payload = TokenPayload::now(user_id, TokenPurpose::EmailVerification);
    let token = match sign_token(&settings.secret_key, &payload, settings.token_ttl) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(user_id, error = %e, "Failed to sign verification token");
            return false;
        }
    };

    let verify_url = format!(
        "{}/users/verify-email/{}",
        settings.public_url.trim_end_matches('/'),
        token
    );
    let message = MailMessage {
        to: email.to_string(),
        subject: "Verify Your Email Address".to_string(),
        body: format!(
            "To verify your email address for the Bookstore App, please click on the following link:\n\
             {verify_url}\n\n\
             If you did not register for this account, please ignore this email.\n"
        ),
    };

    match state.mailer.send(message).await {
        Ok(()) => {
            tracing::info!(user_id, email = %mask_email(email), "Verification email sent");
            true
        }
        Err(e) => {
            tracing::error!(
                user_id,
                email = %mask_email(email),
                error = %e,
                "Failed to send verification email"
            );
            false
        }
    }
}

/// POST /users/register
pub async fn register(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<GatewayState>,
    token_service: web::Data<Arc<dyn TokenService>>,
) -> AppResult<HttpResponse> {
    let request = proxied_request(&req, &body);

    if !matches!(
        request.body,
        ProxyBody::Json(Value::Object(_)) | ProxyBody::Form(_)
    ) {
        return Err(AppError::bad_request(
            "Request body must be a JSON object or form data",
        ));
    }
    if body_field(&request.body, "username").is_none()
        || body_field(&request.body, "email").is_none()
    {
        return Err(AppError::bad_request("Missing required fields: username, email"));
    }

    let response = state
        .users
        .forward(
            "users",
            &request,
            ForwardOverrides::default().method(Method::POST),
        )
        .await?;
    if response.status != StatusCode::CREATED {
        return Ok(relay(response));
    }

    let user = response.json().map_err(AppError::internal)?;
    let (user_id, email, role) = user_identity(&user)?;
    let access_token = token_service.generate_token(user_id, email, vec![role.to_string()])?;
    let email_verification_sent = send_verification_email(&state, user_id, email).await;

    tracing::info!(user_id, email_verification_sent, "User registered");
    Ok(HttpResponse::Created().json(RegistrationResponse {
        message: "User registered successfully. Please check your email for verification."
            .to_string(),
        user,
        access_token,
        email_verification_sent,
    }))
}

/// POST /users/login
pub async fn login(
    req: HttpRequest,
    body: web::Json<LoginRequest>,
    state: web::Data<GatewayState>,
    token_service: web::Data<Arc<dyn TokenService>>,
) -> AppResult<HttpResponse> {
    let (Some(username_or_email), Some(password)) =
        (present(&body.username_or_email), present(&body.password))
    else {
        return Err(AppError::bad_request("Missing username/email or password"));
    };

    let overrides = ForwardOverrides::default()
        .method(Method::POST)
        .json(json!({"username_or_email": username_or_email, "password": password}));
    let response = state.users.forward("login", &inbound(&req), overrides).await?;
    if response.status != StatusCode::OK {
        return Ok(relay(response));
    }

    let user = response.json().map_err(AppError::internal)?;
    if user.get("is_verified").and_then(Value::as_bool) != Some(true) {
        tracing::info!("Login refused for unverified account");
        return Err(AppError::Forbidden(NOT_VERIFIED_MESSAGE.to_string()));
    }

    let (user_id, email, role) = user_identity(&user)?;
    let access_token = token_service.generate_token(user_id, email, vec![role.to_string()])?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        user,
        access_token,
    }))
}

/// POST /users/forgot-password
///
/// Answers identically whether or not the email is registered, and whatever
/// the user service replies.
pub async fn forgot_password(
    req: HttpRequest,
    body: web::Json<ForgotPasswordRequest>,
    state: web::Data<GatewayState>,
) -> AppResult<HttpResponse> {
    let Some(email) = present(&body.email) else {
        return Err(AppError::bad_request("Email is required"));
    };

    let overrides = ForwardOverrides::default()
        .method(Method::POST)
        .json(json!({"email": email}));
    match state
        .users
        .forward("request-password-reset", &inbound(&req), overrides)
        .await
    {
        Ok(response) if !response.is_success() => {
            tracing::warn!(status = %response.status, "Password reset request rejected upstream");
        }
        Err(e) => tracing::warn!(error = %e, "Password reset request not delivered"),
        Ok(_) => {}
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new(RESET_REQUESTED_MESSAGE)))
}

/// POST /users/reset-password
pub async fn reset_password(
    req: HttpRequest,
    body: web::Json<ResetPasswordRequest>,
    state: web::Data<GatewayState>,
) -> AppResult<HttpResponse> {
    let (Some(token), Some(new_password)) = (present(&body.token), present(&body.new_password))
    else {
        return Err(AppError::bad_request("Missing token or new_password"));
    };

    let overrides = ForwardOverrides::default()
        .method(Method::POST)
        .json(json!({"token": token, "new_password": new_password}));
    let response = state
        .users
        .forward("reset-password", &inbound(&req), overrides)
        .await?;

    Ok(relay(response))
}

/// PUT /users/change-password - requires a Bearer token.
pub async fn change_password(
    identity: Identity,
    req: HttpRequest,
    body: web::Json<ChangePasswordRequest>,
    state: web::Data<GatewayState>,
) -> AppResult<HttpResponse> {
    let (Some(current_password), Some(new_password)) =
        (present(&body.current_password), present(&body.new_password))
    else {
        return Err(AppError::bad_request(
            "Missing current_password or new_password",
        ));
    };

    tracing::info!(
        user_id = identity.user_id,
        email = %mask_email(&identity.email),
        "Password change requested"
    );
    let overrides = ForwardOverrides::default().method(Method::PUT).json(json!({
        "current_password": current_password,
        "new_password": new_password,
    }));
    let response = state
        .users
        .forward(
            &format!("users/{}/password", identity.user_id),
            &inbound(&req),
            overrides,
        )
        .await?;

    Ok(relay(response))
}
