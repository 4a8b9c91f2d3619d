//! User roles

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UserValidationError;

/// Role of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Anonymous,
    /// Signed-up user with a verified account
    #[default]
    Authenticated,
    Manager,
    Admin,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        Self::Anonymous,
        Self::Authenticated,
        Self::Manager,
        Self::Admin,
    ];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => "ANONYMOUS",
            Self::Authenticated => "AUTHENTICATED",
            Self::Manager => "MANAGER",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UserValidationError::InvalidRole(s.to_string()))
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
