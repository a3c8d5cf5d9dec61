//! Roles and the navigation surface.
//!
//! The stored role only decides where the landing page sends the user. Both
//! dashboards stay reachable whatever the stored role is.

use crate::errors::Error;
use std::fmt;
use std::str::FromStr;

/// Storage key of the selected role.
pub const USER_ROLE_KEY: &str = "userRole";

/// Who is looking at the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A single client looking at their own payments
    Client,
    /// The integration operator looking at every client
    Admin,
}

impl Role {
    /// Lowercase identifier stored under [`USER_ROLE_KEY`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            _ => Err(Error::UnknownRole {
                value: s.to_string(),
            }),
        }
    }
}

/// Logical screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Role selection
    Landing,
    /// Per-client payments
    ClientDashboard,
    /// Global overview
    AdminDashboard,
}

impl Route {
    /// Where a user with the given role lands.
    #[must_use]
    pub const fn for_role(role: Option<Role>) -> Self {
        match role {
            None => Self::Landing,
            Some(Role::Client) => Self::ClientDashboard,
            Some(Role::Admin) => Self::AdminDashboard,
        }
    }

    /// URL-style path of the screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::ClientDashboard => "/client",
            Self::AdminDashboard => "/admin",
        }
    }
}

/// Interprets a stored role string; an empty or unrecognized value means no role.
#[must_use]
pub fn parse_stored_role(stored: &str) -> Option<Role> {
    stored.parse().ok()
}
