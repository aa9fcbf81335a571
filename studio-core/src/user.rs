//! Client users listed on the dashboard, and admin accounts.
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// A client account as shown in the dashboard user table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientUser {
    pub id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Free-form role label, `User` when unset.
    pub role: String,
    /// Free-form account status, `Active` when unset.
    pub status: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClientUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub amount: Option<Decimal>,
}

/// Role of an admin account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdminRole {
    /// Full access, lands on the dashboard.
    HeadAdmin,
    /// Scheduling only.
    Admin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::HeadAdmin => "HeadAdmin",
            AdminRole::Admin => "Admin",
        }
    }

    pub fn landing(&self) -> Landing {
        match self {
            AdminRole::HeadAdmin => Landing::Dashboard,
            AdminRole::Admin => Landing::Schedule,
        }
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HeadAdmin" => Ok(AdminRole::HeadAdmin),
            "Admin" => Ok(AdminRole::Admin),
            other => Err(other.to_string()),
        }
    }
}

/// Screen an admin is sent to after signing in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Landing {
    Dashboard,
    Schedule,
}

/// Stored admin account. The role is kept as stored text so that an
/// unrecognized role can be reported rather than dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminAccount {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: AdminRole,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedAdmin {
    pub user_id: UserId,
    pub role: AdminRole,
}

impl AuthenticatedAdmin {
    pub fn landing(&self) -> Landing {
        self.role.landing()
    }
}
