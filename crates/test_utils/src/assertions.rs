//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{Money, UserId};
use domain_claims::{ClaimStatus, ExpenseClaim};

/// Asserts that two Money values are equal in both amount and currency
///
/// # Panics
///
/// Panics with a message naming both sides when they differ
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a claim is still awaiting review
///
/// Checks the status together with the review fields, since the two must
/// agree on every claim.
pub fn assert_pending(claim: &ExpenseClaim) {
    assert_eq!(
        claim.status,
        ClaimStatus::Pending,
        "Expected pending claim, got {}",
        claim.status
    );
    assert!(
        claim.reviewer_id.is_none(),
        "Pending claim must not carry a reviewer"
    );
    assert!(
        claim.reviewed_at.is_none(),
        "Pending claim must not carry a review timestamp"
    );
}

/// Asserts that a claim was decided with the given outcome by the given
/// reviewer
pub fn assert_decided(claim: &ExpenseClaim, status: ClaimStatus, reviewer: UserId) {
    assert_eq!(
        claim.status, status,
        "Expected {} claim, got {}",
        status, claim.status
    );
    assert_eq!(
        claim.reviewer_id,
        Some(reviewer),
        "Decided claim must record the deciding reviewer"
    );
    assert!(
        claim.reviewed_at.is_some(),
        "Decided claim must record the review timestamp"
    );
}
