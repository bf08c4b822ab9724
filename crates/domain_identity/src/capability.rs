//! Capability resolution
//!
//! Capabilities are what operations actually check; roles are only the raw
//! material they are derived from. Resolution is deterministic and pure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::UserId;

use crate::role::RoleAssignment;

/// A permission derived from role assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// May transition claims out of the pending state
    Review,
}

/// The set of capabilities a user holds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Creates an empty capability set (plain submitter)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a set containing the review capability
    pub fn reviewer() -> Self {
        let mut set = BTreeSet::new();
        set.insert(Capability::Review);
        Self(set)
    }

    /// Returns true if the set contains the given capability
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Returns true if the holder may review claims
    pub fn can_review(&self) -> bool {
        self.contains(Capability::Review)
    }

    /// Returns true if no capabilities are held
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Derives a user's capability set from their role assignments
///
/// Any `manager` or `admin` assignment grants review authority. A user with
/// no assignments, or with only `employee` assignments, resolves to the
/// empty set.
pub fn resolve_capabilities(assignments: &[RoleAssignment]) -> CapabilitySet {
    if assignments.iter().any(|a| a.role.grants_review()) {
        CapabilitySet::reviewer()
    } else {
        CapabilitySet::empty()
    }
}

/// The user on whose behalf an operation runs
///
/// Built by the caller from the authenticated user id and the capability set
/// resolved from the role directory. Operations receive this value
/// explicitly; there is no ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub capabilities: CapabilitySet,
}

impl Actor {
    /// Creates an actor from an id and resolved capabilities
    pub fn new(id: UserId, capabilities: CapabilitySet) -> Self {
        Self { id, capabilities }
    }

    /// Creates an actor by resolving the given assignments
    pub fn from_assignments(id: UserId, assignments: &[RoleAssignment]) -> Self {
        Self::new(id, resolve_capabilities(assignments))
    }

    /// Returns true if this actor may review claims
    pub fn can_review(&self) -> bool {
        self.capabilities.can_review()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn test_empty_assignments_resolve_to_empty_set() {
        let capabilities = resolve_capabilities(&[]);
        assert!(capabilities.is_empty());
        assert!(!capabilities.can_review());
    }

    #[test]
    fn test_employee_only_is_not_a_reviewer() {
        let user = UserId::new();
        let assignments = [RoleAssignment::new(user, Role::Employee)];

        assert!(!resolve_capabilities(&assignments).can_review());
    }

    #[test]
    fn test_manager_grants_review() {
        let user = UserId::new();
        let assignments = [
            RoleAssignment::new(user, Role::Employee),
            RoleAssignment::new(user, Role::Manager),
        ];

        assert!(resolve_capabilities(&assignments).can_review());
    }

    #[test]
    fn test_admin_grants_review() {
        let user = UserId::new();
        let assignments = [RoleAssignment::new(user, Role::Admin)];

        assert!(resolve_capabilities(&assignments).can_review());
    }

    #[test]
    fn test_actor_from_assignments() {
        let user = UserId::new();
        let actor = Actor::from_assignments(user, &[RoleAssignment::new(user, Role::Manager)]);

        assert_eq!(actor.id, user);
        assert!(actor.can_review());
    }
}
