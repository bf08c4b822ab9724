//! Dashboard summary over a claim collection

use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::claim::{ClaimStatus, ExpenseClaim};

/// Counters and totals shown on the review dashboard
///
/// A snapshot over the claims passed in; holds no reference to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    /// Claims awaiting a decision
    pub pending_count: usize,
    /// Approved claims, including those already reimbursed
    pub approved_count: usize,
    /// Rejected claims
    pub rejected_count: usize,
    /// Sum over every claim regardless of status
    pub total_amount: Money,
}

impl ClaimSummary {
    /// Summarizes a collection of claims
    ///
    /// Reimbursed claims count as approved: rejection is the only negative
    /// outcome. The total deliberately includes rejected claims, matching
    /// what the dashboard has always displayed.
    pub fn of(claims: &[ExpenseClaim]) -> Self {
        let currency = claims
            .first()
            .map(|c| c.amount.currency())
            .unwrap_or(Currency::USD);

        let total_amount = claims
            .iter()
            .fold(Money::zero(currency), |acc, c| acc + c.amount);

        Self {
            pending_count: claims
                .iter()
                .filter(|c| c.status == ClaimStatus::Pending)
                .count(),
            approved_count: claims
                .iter()
                .filter(|c| {
                    matches!(c.status, ClaimStatus::Approved | ClaimStatus::Reimbursed)
                })
                .count(),
            rejected_count: claims
                .iter()
                .filter(|c| c.status == ClaimStatus::Rejected)
                .count(),
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::ExpenseCategory;
    use chrono::NaiveDate;
    use core_kernel::UserId;
    use domain_identity::{Actor, CapabilitySet};
    use rust_decimal_macros::dec;

    fn claim_with(amount: rust_decimal::Decimal, status: ClaimStatus) -> ExpenseClaim {
        let mut claim = ExpenseClaim::submit(
            UserId::new(),
            Money::new(amount, Currency::USD),
            ExpenseCategory::Travel,
            "Conference travel costs",
            NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            None,
        )
        .unwrap();

        let actor = Actor::new(UserId::new(), CapabilitySet::reviewer());
        match status {
            ClaimStatus::Pending => {}
            ClaimStatus::Approved => claim.transition(ClaimStatus::Approved, &actor).unwrap(),
            ClaimStatus::Rejected => claim.transition(ClaimStatus::Rejected, &actor).unwrap(),
            ClaimStatus::Reimbursed => {
                claim.transition(ClaimStatus::Approved, &actor).unwrap();
                claim.transition(ClaimStatus::Reimbursed, &actor).unwrap();
            }
        }
        claim
    }

    #[test]
    fn test_empty_collection() {
        let summary = ClaimSummary::of(&[]);

        assert_eq!(summary.pending_count, 0);
        assert_eq!(summary.approved_count, 0);
        assert_eq!(summary.rejected_count, 0);
        assert!(summary.total_amount.is_zero());
    }

    #[test]
    fn test_mixed_collection() {
        let claims = vec![
            claim_with(dec!(10), ClaimStatus::Pending),
            claim_with(dec!(20), ClaimStatus::Approved),
            claim_with(dec!(5), ClaimStatus::Rejected),
            claim_with(dec!(15), ClaimStatus::Reimbursed),
        ];

        let summary = ClaimSummary::of(&claims);

        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.approved_count, 2);
        assert_eq!(summary.rejected_count, 1);
        assert_eq!(summary.total_amount.amount(), dec!(50));
    }

    #[test]
    fn test_total_includes_rejected() {
        let claims = vec![
            claim_with(dec!(30), ClaimStatus::Approved),
            claim_with(dec!(70), ClaimStatus::Rejected),
        ];

        let summary = ClaimSummary::of(&claims);
        assert_eq!(summary.total_amount.amount(), dec!(100));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let claims = vec![claim_with(dec!(12.50), ClaimStatus::Pending)];
        let summary = ClaimSummary::of(&claims);
        drop(claims);

        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.total_amount.amount(), dec!(12.50));
    }
}
