//! Claims Domain Ports
//!
//! Persistence is an external collaborator. The store contract matters more
//! than the storage technology: claims are inserted pending, listings come
//! back newest first, and the review write is conditional on the status the
//! reviewer saw. The store refuses it with a conflict when a concurrent
//! review got there first.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{ClaimId, DomainPort, PortError, UserId};

use crate::claim::{ClaimStatus, ExpenseClaim};

/// The review decision applied to a claim as one atomic write
///
/// Status, reviewer, and review timestamp always travel together; a claim
/// must never be observable with only some of them changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub status: ClaimStatus,
    pub reviewer_id: Option<UserId>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewUpdate {
    /// Captures the review fields of an already-transitioned claim
    pub fn from_claim(claim: &ExpenseClaim) -> Self {
        Self {
            status: claim.status,
            reviewer_id: claim.reviewer_id,
            reviewed_at: claim.reviewed_at,
        }
    }
}

/// Persistent storage for expense claims
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Inserts a newly submitted claim
    ///
    /// Claims arrive in the pending state; the store rejects anything else.
    async fn insert(&self, claim: ExpenseClaim) -> Result<ExpenseClaim, PortError>;

    /// Retrieves a claim by id
    async fn get(&self, id: ClaimId) -> Result<ExpenseClaim, PortError>;

    /// Lists one submitter's claims, newest first
    async fn list_for_submitter(&self, submitter_id: UserId)
        -> Result<Vec<ExpenseClaim>, PortError>;

    /// Lists every claim, newest first (reviewer dashboards)
    async fn list_all(&self) -> Result<Vec<ExpenseClaim>, PortError>;

    /// Applies a review decision, guarded by the status the caller observed
    ///
    /// The write succeeds only if the stored status still equals `expected`
    /// (compare-and-set); otherwise the store returns a conflict and leaves
    /// the claim unchanged. This is what serializes two reviewers racing on
    /// the same claim.
    async fn apply_review(
        &self,
        id: ClaimId,
        expected: ClaimStatus,
        update: ReviewUpdate,
    ) -> Result<ExpenseClaim, PortError>;
}

/// In-memory claim store for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use tokio::sync::RwLock;

    /// Mock implementation of [`ClaimStore`] backed by a vector
    #[derive(Debug, Default)]
    pub struct MemoryClaimStore {
        claims: RwLock<Vec<ExpenseClaim>>,
    }

    impl MemoryClaimStore {
        /// Creates an empty store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store for tests
        pub async fn with_claims(claims: Vec<ExpenseClaim>) -> Self {
            let store = Self::new();
            store.claims.write().await.extend(claims);
            store
        }
    }

    impl DomainPort for MemoryClaimStore {}

    #[async_trait]
    impl ClaimStore for MemoryClaimStore {
        async fn insert(&self, claim: ExpenseClaim) -> Result<ExpenseClaim, PortError> {
            if claim.status != ClaimStatus::Pending {
                return Err(PortError::validation(
                    "New claims must be inserted as pending",
                ));
            }
            self.claims.write().await.push(claim.clone());
            Ok(claim)
        }

        async fn get(&self, id: ClaimId) -> Result<ExpenseClaim, PortError> {
            self.claims
                .read()
                .await
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| PortError::not_found("ExpenseClaim", id))
        }

        async fn list_for_submitter(
            &self,
            submitter_id: UserId,
        ) -> Result<Vec<ExpenseClaim>, PortError> {
            let mut claims: Vec<_> = self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.submitter_id == submitter_id)
                .cloned()
                .collect();
            claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(claims)
        }

        async fn list_all(&self) -> Result<Vec<ExpenseClaim>, PortError> {
            let mut claims: Vec<_> = self.claims.read().await.iter().cloned().collect();
            claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(claims)
        }

        async fn apply_review(
            &self,
            id: ClaimId,
            expected: ClaimStatus,
            update: ReviewUpdate,
        ) -> Result<ExpenseClaim, PortError> {
            let mut claims = self.claims.write().await;
            let claim = claims
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| PortError::not_found("ExpenseClaim", id))?;

            if claim.status != expected {
                return Err(PortError::conflict(format!(
                    "Claim {} is {}, expected {}",
                    id, claim.status, expected
                )));
            }

            claim.status = update.status;
            claim.reviewer_id = update.reviewer_id;
            claim.reviewed_at = update.reviewed_at;
            Ok(claim.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MemoryClaimStore;
    use super::*;
    use crate::claim::ExpenseCategory;
    use chrono::NaiveDate;
    use core_kernel::{Currency, Money};
    use domain_identity::{Actor, CapabilitySet};
    use rust_decimal_macros::dec;

    fn pending_claim(submitter: UserId) -> ExpenseClaim {
        ExpenseClaim::submit(
            submitter,
            Money::new(dec!(25.00), Currency::USD),
            ExpenseCategory::Transportation,
            "Airport taxi after the late flight",
            NaiveDate::from_ymd_opt(2024, 4, 18).unwrap(),
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = MemoryClaimStore::new();
        let claim = pending_claim(UserId::new());

        let inserted = store.insert(claim.clone()).await.unwrap();
        let fetched = store.get(inserted.id).await.unwrap();

        assert_eq!(fetched.id, claim.id);
        assert_eq!(fetched.status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_insert_refuses_non_pending() {
        let store = MemoryClaimStore::new();
        let mut claim = pending_claim(UserId::new());
        let actor = Actor::new(UserId::new(), CapabilitySet::reviewer());
        claim.transition(ClaimStatus::Approved, &actor).unwrap();

        let result = store.insert(claim).await;
        assert!(matches!(result, Err(PortError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_listing_is_scoped_to_submitter() {
        let store = MemoryClaimStore::new();
        let alice = UserId::new();
        let bob = UserId::new();

        store.insert(pending_claim(alice)).await.unwrap();
        store.insert(pending_claim(bob)).await.unwrap();
        store.insert(pending_claim(alice)).await.unwrap();

        assert_eq!(store.list_for_submitter(alice).await.unwrap().len(), 2);
        assert_eq!(store.list_for_submitter(bob).await.unwrap().len(), 1);
        assert_eq!(store.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_apply_review_happy_path() {
        let store = MemoryClaimStore::new();
        let mut claim = store.insert(pending_claim(UserId::new())).await.unwrap();

        let actor = Actor::new(UserId::new(), CapabilitySet::reviewer());
        claim.transition(ClaimStatus::Approved, &actor).unwrap();

        let stored = store
            .apply_review(claim.id, ClaimStatus::Pending, ReviewUpdate::from_claim(&claim))
            .await
            .unwrap();

        assert_eq!(stored.status, ClaimStatus::Approved);
        assert_eq!(stored.reviewer_id, Some(actor.id));
        assert!(stored.reviewed_at.is_some());
    }

    #[tokio::test]
    async fn test_apply_review_conflicts_on_moved_status() {
        let store = MemoryClaimStore::new();
        let claim = store.insert(pending_claim(UserId::new())).await.unwrap();

        let first = Actor::new(UserId::new(), CapabilitySet::reviewer());
        let mut approved = claim.clone();
        approved.transition(ClaimStatus::Approved, &first).unwrap();
        store
            .apply_review(claim.id, ClaimStatus::Pending, ReviewUpdate::from_claim(&approved))
            .await
            .unwrap();

        // A second reviewer raced on the same pending snapshot
        let second = Actor::new(UserId::new(), CapabilitySet::reviewer());
        let mut rejected = claim.clone();
        rejected.transition(ClaimStatus::Rejected, &second).unwrap();
        let result = store
            .apply_review(claim.id, ClaimStatus::Pending, ReviewUpdate::from_claim(&rejected))
            .await;

        assert!(matches!(result, Err(PortError::Conflict { .. })));

        let stored = store.get(claim.id).await.unwrap();
        assert_eq!(stored.status, ClaimStatus::Approved);
        assert_eq!(stored.reviewer_id, Some(first.id));
    }

    #[tokio::test]
    async fn test_apply_review_unknown_claim() {
        let store = MemoryClaimStore::new();
        let result = store
            .apply_review(
                ClaimId::new(),
                ClaimStatus::Pending,
                ReviewUpdate {
                    status: ClaimStatus::Approved,
                    reviewer_id: Some(UserId::new()),
                    reviewed_at: Some(Utc::now()),
                },
            )
            .await;

        assert!(matches!(result, Err(PortError::NotFound { .. })));
    }
}
