//! Demo users for the role toggle.
//!
//! There are no credentials: picking a role yields a fixed user.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Guest,
    Client,
    Admin,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GUEST" => Ok(Self::Guest),
            "CLIENT" => Ok(Self::Client),
            "ADMIN" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub role: UserRole,
    pub name: String,
}

/// Request body for the mock login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub role: UserRole,
}

/// Map a role to its demo user. Guests stay anonymous.
pub fn demo_user(role: UserRole) -> Option<User> {
    match role {
        UserRole::Admin => Some(User {
            username: "admin".to_string(),
            role: UserRole::Admin,
            name: "Robert Chief".to_string(),
        }),
        UserRole::Client => Some(User {
            username: "client".to_string(),
            role: UserRole::Client,
            name: "Sarah Homeowner".to_string(),
        }),
        UserRole::Guest => None,
    }
}
