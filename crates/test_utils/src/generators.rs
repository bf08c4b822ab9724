//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants.

use core_kernel::{Currency, Money};
use domain_claims::{ClaimStatus, ExpenseCategory, ExpenseClaim};
use proptest::prelude::*;

use crate::builders::TestClaimBuilder;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for generating positive USD Money values
pub fn usd_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for generating expense categories
pub fn category_strategy() -> impl Strategy<Value = ExpenseCategory> {
    prop_oneof![
        Just(ExpenseCategory::Travel),
        Just(ExpenseCategory::Meals),
        Just(ExpenseCategory::Accommodation),
        Just(ExpenseCategory::Transportation),
        Just(ExpenseCategory::Supplies),
        Just(ExpenseCategory::Entertainment),
        Just(ExpenseCategory::Other),
    ]
}

/// Strategy for generating claim statuses
pub fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Reimbursed),
    ]
}

/// Strategy for generating purpose text that passes validation
pub fn purpose_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z ]{4,60}"
}

/// Strategy for generating whole claims in arbitrary lifecycle states
pub fn claim_strategy() -> impl Strategy<Value = ExpenseClaim> {
    (
        usd_money_strategy(),
        category_strategy(),
        status_strategy(),
        purpose_strategy(),
    )
        .prop_map(|(amount, category, status, purpose)| {
            TestClaimBuilder::new()
                .with_amount(amount)
                .with_category(category)
                .with_status(status)
                .with_purpose(purpose)
                .build()
        })
}
