//! User model
//!
//! The client never fetches users. A `User` is rebuilt from the claims of
//! the session token, see `session::token`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed-in visitor or curator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server id, 0 when the token does not carry one
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl User {
    /// Check if the user is an administrator
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// "First Last", or the email when no name is known
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

/// Role carried in the token's `role` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserRole {
    #[serde(rename = "ROLE_USER")]
    #[default]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl UserRole {
    /// Map a raw claim to a role.
    ///
    /// Only `ROLE_ADMIN` grants the admin role. The bare `ADMIN` spelling of
    /// older tokens is not honoured.
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim {
            Some("ROLE_ADMIN") => UserRole::Admin,
            _ => UserRole::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "ROLE_USER",
            UserRole::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /auth/authenticate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Response of both auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}
