//! Identity Domain Ports
//!
//! The role directory is an external system of record. The domain only ever
//! reads from it; writing assignments is someone else's job.

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, UserId};

use crate::role::RoleAssignment;

/// Read access to the external identity/role source
///
/// Implementations can be internal (database) or external (an HR system
/// API). Capability resolution is a pure function over what this port
/// returns; see [`crate::resolve_capabilities`].
#[async_trait]
pub trait RoleDirectory: DomainPort {
    /// Returns all role assignments held by the given user
    ///
    /// A user unknown to the directory simply has no assignments; that is
    /// not an error.
    async fn assignments_for(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, PortError>;
}

/// In-memory role directory for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use crate::role::Role;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// Mock implementation of [`RoleDirectory`] backed by a hash map
    #[derive(Debug, Default)]
    pub struct MemoryRoleDirectory {
        assignments: RwLock<HashMap<UserId, Vec<RoleAssignment>>>,
    }

    impl MemoryRoleDirectory {
        /// Creates an empty directory
        pub fn new() -> Self {
            Self::default()
        }

        /// Grants a role to a user
        pub async fn grant(&self, user_id: UserId, role: Role) {
            self.assignments
                .write()
                .await
                .entry(user_id)
                .or_default()
                .push(RoleAssignment::new(user_id, role));
        }
    }

    impl DomainPort for MemoryRoleDirectory {}

    #[async_trait]
    impl RoleDirectory for MemoryRoleDirectory {
        async fn assignments_for(
            &self,
            user_id: UserId,
        ) -> Result<Vec<RoleAssignment>, PortError> {
            Ok(self
                .assignments
                .read()
                .await
                .get(&user_id)
                .cloned()
                .unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryRoleDirectory;
    use super::*;
    use crate::capability::resolve_capabilities;
    use crate::role::Role;

    #[tokio::test]
    async fn test_unknown_user_has_no_assignments() {
        let directory = MemoryRoleDirectory::new();
        let assignments = directory.assignments_for(UserId::new()).await.unwrap();
        assert!(assignments.is_empty());
    }

    #[tokio::test]
    async fn test_granted_roles_are_returned() {
        let directory = MemoryRoleDirectory::new();
        let user = UserId::new();

        directory.grant(user, Role::Employee).await;
        directory.grant(user, Role::Manager).await;

        let assignments = directory.assignments_for(user).await.unwrap();
        assert_eq!(assignments.len(), 2);
        assert!(resolve_capabilities(&assignments).can_review());
    }
}
