//! Identity primitives shared by every Agora crate: roles, the authenticated
//! principal, password hashing and signed access tokens.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod password;
mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenManager};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("missing authentication token")]
    MissingToken,
    #[error("invalid token: {0}")]
    InvalidToken(String),
    #[error("token creation failed: {0}")]
    TokenCreation(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Closed set of actors the backend knows about.
///
/// ```
/// use agora_auth::Role;
///
/// let role: Role = "COMMISSIONER".parse().unwrap();
/// assert_eq!(role, Role::Commissioner);
/// assert_eq!(role.as_str(), "COMMISSIONER");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Client,
    Employee,
    Commissioner,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Employee => "EMPLOYEE",
            Role::Commissioner => "COMMISSIONER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Role::Client),
            "EMPLOYEE" => Ok(Role::Employee),
            "COMMISSIONER" => Ok(Role::Commissioner),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(AuthError::UnknownRole(value.to_string())),
        }
    }
}

/// The authenticated caller attached to every protected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
    pub name: String,
}

impl Principal {
    pub fn new(id: i64, role: Role, name: impl Into<String>) -> Self {
        Self {
            id,
            role,
            name: name.into(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// True when the principal acts as `role` with identity `id`.
    pub fn is(&self, role: Role, id: i64) -> bool {
        self.role == role && self.id == id
    }
}
