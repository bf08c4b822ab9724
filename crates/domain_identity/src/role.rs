//! Roles and role assignments
//!
//! A user may hold any number of roles. Assignments are sourced from an
//! external directory and treated as read-only input here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use core_kernel::UserId;

/// A role a user can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular submitter of expense claims
    Employee,
    /// Reviews and decides claims for their reports
    Manager,
    /// Full administrative access
    Admin,
}

impl Role {
    /// Returns the persisted name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Returns true if this role carries review authority
    pub fn grants_review(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "employee" => Ok(Role::Employee),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            other => Err(RoleError::UnknownRole(other.to_string())),
        }
    }
}

/// Errors for role parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}

/// A single (user, role) pairing from the role directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: UserId,
    pub role: Role,
}

impl RoleAssignment {
    /// Creates a new assignment
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Employee, Role::Manager, Role::Admin] {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert_eq!(
            "auditor".parse::<Role>(),
            Err(RoleError::UnknownRole("auditor".to_string()))
        );
    }

    #[test]
    fn test_review_authority() {
        assert!(!Role::Employee.grants_review());
        assert!(Role::Manager.grants_review());
        assert!(Role::Admin.grants_review());
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Manager).unwrap();
        assert_eq!(json, "\"manager\"");
    }
}
