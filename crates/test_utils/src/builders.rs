//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. Tests specify only the fields they care about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{ClaimId, Money, ReceiptId, UserId};
use domain_claims::{ClaimStatus, ExpenseCategory, ExpenseClaim};

use crate::fixtures::{IdFixtures, MoneyFixtures, TemporalFixtures};

/// Builder for constructing test expense claims
///
/// Builds the claim record directly so tests can place it in any lifecycle
/// state; reviewer fields are filled in automatically for decided statuses
/// to keep the pending-iff-unreviewed invariant intact.
pub struct TestClaimBuilder {
    submitter_id: UserId,
    amount: Money,
    category: ExpenseCategory,
    purpose: String,
    expense_date: NaiveDate,
    receipt: Option<ReceiptId>,
    status: ClaimStatus,
    reviewer_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            submitter_id: IdFixtures::submitter_id(),
            amount: MoneyFixtures::usd_25(),
            category: ExpenseCategory::Meals,
            purpose: "Team lunch after the sprint review".to_string(),
            expense_date: TemporalFixtures::expense_date(),
            receipt: None,
            status: ClaimStatus::Pending,
            reviewer_id: None,
            created_at: TemporalFixtures::submitted_at(),
        }
    }

    /// Sets the submitter
    pub fn with_submitter(mut self, submitter_id: UserId) -> Self {
        self.submitter_id = submitter_id;
        self
    }

    /// Sets the amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: ExpenseCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the purpose text
    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Sets the expense date
    pub fn with_expense_date(mut self, date: NaiveDate) -> Self {
        self.expense_date = date;
        self
    }

    /// Attaches a receipt reference
    pub fn with_receipt(mut self, receipt: ReceiptId) -> Self {
        self.receipt = Some(receipt);
        self
    }

    /// Places the claim in the given lifecycle state
    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the reviewer recorded on decided claims
    pub fn with_reviewer(mut self, reviewer_id: UserId) -> Self {
        self.reviewer_id = Some(reviewer_id);
        self
    }

    /// Sets the creation timestamp, for ordering tests
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds the test claim
    pub fn build(self) -> ExpenseClaim {
        let decided = self.status != ClaimStatus::Pending;
        let reviewer_id = if decided {
            Some(self.reviewer_id.unwrap_or_else(IdFixtures::reviewer_id))
        } else {
            None
        };
        let reviewed_at = decided.then(TemporalFixtures::reviewed_at);

        ExpenseClaim {
            id: ClaimId::new_v7(),
            submitter_id: self.submitter_id,
            amount: self.amount,
            category: self.category,
            purpose: self.purpose,
            expense_date: self.expense_date,
            receipt: self.receipt,
            status: self.status,
            reviewer_id,
            reviewed_at,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_build_is_pending() {
        let claim = TestClaimBuilder::new().build();

        assert_eq!(claim.status, ClaimStatus::Pending);
        assert!(claim.reviewer_id.is_none());
        assert!(claim.reviewed_at.is_none());
    }

    #[test]
    fn test_decided_build_fills_review_fields() {
        let claim = TestClaimBuilder::new()
            .with_status(ClaimStatus::Approved)
            .build();

        assert!(claim.reviewer_id.is_some());
        assert!(claim.reviewed_at.is_some());
    }

    #[test]
    fn test_builder_overrides() {
        let submitter = UserId::new();
        let claim = TestClaimBuilder::new()
            .with_submitter(submitter)
            .with_category(ExpenseCategory::Travel)
            .with_purpose("Taxi from the airport")
            .build();

        assert_eq!(claim.submitter_id, submitter);
        assert_eq!(claim.category, ExpenseCategory::Travel);
        assert_eq!(claim.purpose, "Taxi from the airport");
    }
}
