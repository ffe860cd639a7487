use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Account role. Stored as its lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Store,
    Sales,
    #[default]
    Customer,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Store, Role::Sales, Role::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Store => "store",
            Role::Sales => "sales",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
                DomainError::validation(format!(
                    "Invalid role. Allowed roles are: {}",
                    allowed.join(", ")
                ))
            })
    }
}

/// User entity. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub profile_pic: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Apply a validated partial update.
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(first_name) = changes.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        if let Some(profile_pic) = changes.profile_pic {
            self.profile_pic = Some(profile_pic);
        }
        self.touch();
    }

    pub fn set_password_hash(&mut self, hash: String) {
        self.password_hash = hash;
        self.touch();
    }

    pub fn mark_verified(&mut self, verified: bool) {
        self.is_verified = verified;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Role,
    pub profile_pic: Option<String>,
}

/// Partial update of the general profile fields (never the password).
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub profile_pic: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.profile_pic.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("store".parse::<Role>().unwrap(), Role::Store);
        let err = "root".parse::<Role>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid role. Allowed roles are: admin, store, sales, customer"
        );
    }

    #[test]
    fn test_user_json_omits_password_hash() {
        let now = Utc::now();
        let user = User {
            id: 7,
            username: "reader".to_string(),
            email: "reader@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: None,
            last_name: None,
            role: Role::Customer,
            profile_pic: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "customer");
        assert_eq!(json["is_verified"], false);
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(UserChanges::default().is_empty());
        let changes = UserChanges {
            last_name: Some("Doe".to_string()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
