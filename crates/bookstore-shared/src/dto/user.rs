use serde::{Deserialize, Serialize};

/// Request to create a user account. Accepted as JSON or form data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    /// A random password is generated when absent.
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub profile_pic: Option<String>,
}

/// Partial update of a user's profile. Passwords are changed elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub profile_pic: Option<String>,
}
