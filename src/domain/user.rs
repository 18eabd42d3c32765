//! Account entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_CLIENT};

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[serde(rename = "Cliente")]
    Client,
    #[serde(rename = "Admin")]
    Admin,
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::Client => ROLE_CLIENT,
        }
    }
}

/// Unknown role strings degrade to the least privileged role.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::Client,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub date_joined: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Account data safe to return to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "ana")]
    pub username: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "Cliente")]
    pub role: UserRole,
    pub date_joined: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            date_joined: user.date_joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::from("Admin"), UserRole::Admin);
        assert_eq!(UserRole::from("Cliente"), UserRole::Client);
        assert_eq!(UserRole::from("root"), UserRole::Client);
        assert_eq!(UserRole::Admin.to_string(), "Admin");
    }

    #[test]
    fn test_role_serializes_with_stored_label() {
        let json = serde_json::to_string(&UserRole::Client).unwrap();
        assert_eq!(json, "\"Cliente\"");
    }

    #[test]
    fn test_response_omits_password_hash() {
        let user = User {
            id: 7,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            role: UserRole::Client,
            date_joined: Utc::now(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "Cliente");
    }
}
