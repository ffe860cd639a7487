//! Credential checks, password changes and resets, verification flag.

use actix_web::{HttpResponse, web};
use serde_json::Value;

use bookstore_core::domain::{User, present};
use bookstore_core::ports::{MailMessage, TokenError, TokenPayload, TokenPurpose};
use bookstore_infra::auth::{sign_token, verify_token};
use bookstore_infra::mask_email;
use bookstore_shared::MessageResponse;
use bookstore_shared::dto::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    VerifyUserRequest,
};
use bookstore_web::{AppError, AppResult};

use super::find_user;
use crate::state::UserState;

pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent.";
const INVALID_RESET_TOKEN: &str = "Invalid or expired token";

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

/// POST /login - returns the user on matching credentials.
pub async fn login(
    state: web::Data<UserState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(username_or_email), Some(password)) =
        (present(request.username_or_email), present(request.password))
    else {
        return Err(AppError::bad_request(
            "Username/email and password are required",
        ));
    };

    let user = state
        .users
        .find_by_login(&username_or_email)
        .await?
        .ok_or_else(invalid_credentials)?;
    if !state.passwords.verify(&password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "Credentials accepted");
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /users/{id}/password
pub async fn change_password(
    state: web::Data<UserState>,
    id: web::Path<i32>,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(current_password), Some(new_password)) =
        (present(request.current_password), present(request.new_password))
    else {
        return Err(AppError::bad_request(
            "Current password and new password are required",
        ));
    };

    let mut user = find_user(&state, id.into_inner()).await?;
    if !state.passwords.verify(&current_password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid current password".to_string(),
        ));
    }

    user.set_password_hash(state.passwords.hash(&new_password)?);
    let user = state.users.update(user).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}

async fn send_reset_email(state: &UserState, user: &User) {
    let payload = TokenPayload::now(user.id, TokenPurpose::PasswordReset);
    let token = match sign_token(&state.reset.secret_key, &payload, state.reset.token_ttl) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(user_id = user.id, error = %e, "Failed to sign reset token");
            return;
        }
    };

    let link = format!("{}?token={}", state.reset.reset_url, token);
    let message = MailMessage {
        to: user.email.clone(),
        subject: "Password Reset Request".to_string(),
        body: format!(
            "To reset your password, visit the following link:\n{link}\n\n\
             If you did not make this request then simply ignore this email and no changes will be made.\n"
        ),
    };

    match state.mailer.send(message).await {
        Ok(()) => tracing::info!(
            user_id = user.id,
            email = %mask_email(&user.email),
            "Password reset email sent"
        ),
        Err(e) => tracing::error!(
            user_id = user.id,
            email = %mask_email(&user.email),
            error = %e,
            "Failed to send password reset email"
        ),
    }
}

/// POST /request-password-reset
///
/// Same response whether or not the email belongs to an account.
pub async fn request_password_reset(
    state: web::Data<UserState>,
    body: web::Json<ForgotPasswordRequest>,
) -> AppResult<HttpResponse> {
    let Some(email) = present(body.into_inner().email) else {
        return Err(AppError::bad_request("Email is required"));
    };

    match state.users.find_by_email(&email).await? {
        Some(user) => send_reset_email(&state, &user).await,
        None => tracing::debug!(email = %mask_email(&email), "Password reset for unknown email"),
    }

    Ok(HttpResponse::Ok().json(MessageResponse::new(RESET_REQUESTED_MESSAGE)))
}

/// POST /reset-password
pub async fn reset_password(
    state: web::Data<UserState>,
    body: web::Json<ResetPasswordRequest>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner();
    let (Some(token), Some(new_password)) = (present(request.token), present(request.new_password))
    else {
        return Err(AppError::bad_request("Token and new password are required"));
    };

    let payload = verify_token(&state.reset.secret_key, &token, TokenPurpose::PasswordReset)
        .map_err(|e| match e {
            TokenError::Internal(msg) => AppError::Internal(msg),
            rejected => {
                tracing::info!(reason = %rejected, "Password reset token rejected");
                AppError::bad_request(INVALID_RESET_TOKEN)
            }
        })?;

    let Some(mut user) = state.users.find_by_id(payload.subject_id).await? else {
        tracing::warn!(user_id = payload.subject_id, "Reset token for a deleted user");
        return Err(AppError::bad_request(INVALID_RESET_TOKEN));
    };

    user.set_password_hash(state.passwords.hash(&new_password)?);
    let user = state.users.update(user).await?;

    tracing::info!(user_id = user.id, "Password reset");
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}

/// PUT /users/{id}/verify - body `{"is_verified": bool}`.
pub async fn set_verified(
    state: web::Data<UserState>,
    id: web::Path<i32>,
    body: web::Json<VerifyUserRequest>,
) -> AppResult<HttpResponse> {
    let Some(Value::Bool(verified)) = body.into_inner().is_verified else {
        return Err(AppError::bad_request("is_verified must be a boolean"));
    };

    let mut user = find_user(&state, id.into_inner()).await?;
    user.mark_verified(verified);
    let user = state.users.update(user).await?;

    tracing::info!(user_id = user.id, verified, "Verification status updated");
    Ok(HttpResponse::Ok().json(user))
}
