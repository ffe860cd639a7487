use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to login with a username or an email address.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username_or_email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Body of `PUT /users/{id}/verify`. Kept as raw JSON so a non-boolean
/// value can be reported precisely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyUserRequest {
    pub is_verified: Option<Value>,
}

/// Gateway response to a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub message: String,
    pub user: Value,
    pub access_token: String,
    pub email_verification_sent: bool,
}

/// Gateway response to a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: Value,
    pub access_token: String,
}
