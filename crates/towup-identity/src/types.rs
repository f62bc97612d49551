//! Principal types: who is signed in, and in what capacity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::IdentityError;

// ---------------------------------------------------------------------------
// EntityId
// ---------------------------------------------------------------------------

/// The backend identifier of the authenticated principal.
///
/// Depending on the account type this points at a company record (fleet
/// owner, recovery company) or a user record (tow-truck operator, admin).
/// The backend issues it as an opaque string; the client never interprets
/// it beyond equality.
///
/// `#[serde(transparent)]` keeps the wire shape a bare string, matching
/// what the backend sends in the sign-in bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Borrows the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The account type of the authenticated principal.
///
/// A closed enumeration — the backend only ever issues these four values,
/// and the route guard gates role-restricted screens on exact equality.
///
/// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` matches the backend's
/// wire values (`FLEET_OWNER`, `REPO_COMPANY`, `TOW_TRUCK`, `SYS_ADMIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Owns a vehicle fleet and dispatches recovery jobs.
    FleetOwner,
    /// A repossession/recovery company fulfilling jobs.
    RepoCompany,
    /// An individual tow-truck operator.
    TowTruck,
    /// Platform administrator (account and document approval).
    SysAdmin,
}

impl Role {
    /// The backend wire value for this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::FleetOwner => "FLEET_OWNER",
            Role::RepoCompany => "REPO_COMPANY",
            Role::TowTruck => "TOW_TRUCK",
            Role::SysAdmin => "SYS_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FLEET_OWNER" => Ok(Role::FleetOwner),
            "REPO_COMPANY" => Ok(Role::RepoCompany),
            "TOW_TRUCK" => Ok(Role::TowTruck),
            "SYS_ADMIN" => Ok(Role::SysAdmin),
            other => Err(IdentityError::UnknownRole(other.to_string())),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
