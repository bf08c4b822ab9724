//! Role directory repository
//!
//! Read access to the `user_roles` table, the system of record for role
//! assignments:
//!
//! ```sql
//! CREATE TABLE user_roles (
//!     user_id UUID NOT NULL,
//!     role    TEXT NOT NULL,
//!     PRIMARY KEY (user_id, role)
//! );
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{DomainPort, PortError, UserId};
use domain_identity::{RoleAssignment, RoleDirectory};

use crate::error::DatabaseError;

/// Repository for role assignments
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Creates a new repository on the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_assignments(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RoleAssignment>, DatabaseError> {
        let rows = sqlx::query_as::<_, RoleAssignmentRow>(
            "SELECT user_id, role FROM user_roles WHERE user_id = $1",
        )
        .bind(Uuid::from(user_id))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RoleAssignmentRow::into_domain).collect()
    }
}

impl DomainPort for RoleRepository {}

#[async_trait]
impl RoleDirectory for RoleRepository {
    async fn assignments_for(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, PortError> {
        Ok(self.fetch_assignments(user_id).await?)
    }
}

/// Database row for a role assignment
#[derive(Debug, Clone, sqlx::FromRow)]
struct RoleAssignmentRow {
    user_id: Uuid,
    role: String,
}

impl RoleAssignmentRow {
    fn into_domain(self) -> Result<RoleAssignment, DatabaseError> {
        let role = self
            .role
            .parse()
            .map_err(|e| DatabaseError::CorruptRecord(format!("role: {e}")))?;

        Ok(RoleAssignment::new(UserId::from(self.user_id), role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_identity::Role;

    #[test]
    fn test_row_maps_to_domain() {
        let row = RoleAssignmentRow {
            user_id: Uuid::new_v4(),
            role: "manager".to_string(),
        };

        let assignment = row.into_domain().unwrap();
        assert_eq!(assignment.role, Role::Manager);
    }

    #[test]
    fn test_unknown_role_is_corrupt() {
        let row = RoleAssignmentRow {
            user_id: Uuid::new_v4(),
            role: "superuser".to_string(),
        };

        assert!(matches!(
            row.into_domain(),
            Err(DatabaseError::CorruptRecord(_))
        ));
    }
}
