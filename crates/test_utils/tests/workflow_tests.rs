//! Cross-domain workflow tests
//!
//! These tests verify end-to-end scenarios that involve multiple crates
//! working together: receipt intake feeding claim submission, role-gated
//! review against the claim store, and dashboard summaries.

use rust_decimal_macros::dec;

use core_kernel::{Currency, Money, UserId};
use domain_claims::ports::mock::MemoryClaimStore;
use domain_claims::{ClaimStatus, ClaimStore, ClaimSummary, ExpenseCategory, ExpenseClaim, ReviewUpdate};
use domain_identity::ports::mock::MemoryRoleDirectory;
use domain_identity::{Actor, Role, RoleDirectory};
use domain_receipt::ports::mock::{MemoryReceiptVault, StubRecognition};
use domain_receipt::{parse_expense_date, FieldExtractor, ReceiptVault, TextRecognition};

use test_utils::{
    assert_decided, assert_money_eq, assert_pending, claim_strategy, ReceiptTextFixtures,
    TemporalFixtures, TestClaimBuilder,
};

mod receipt_to_claim_workflow {
    use super::*;

    /// Tests the full intake path: recognize, extract, pre-fill, submit
    #[tokio::test]
    async fn test_receipt_prefills_a_draft_claim() {
        let recognition = StubRecognition::returning(ReceiptTextFixtures::diner());
        let vault = MemoryReceiptVault::new();
        let extractor = FieldExtractor::new();

        // Upload the artifact, recognize its text, extract candidates
        let receipt_id = vault.store("diner.jpg", b"jpeg bytes").await.unwrap();
        let text = recognition.recognize(b"jpeg bytes").await.unwrap();
        let fields = extractor.extract(&text);

        let amount: rust_decimal::Decimal = fields.amount.as_deref().unwrap().parse().unwrap();
        let expense_date = fields.date.as_deref().and_then(parse_expense_date).unwrap();

        let claim = ExpenseClaim::submit(
            UserId::new(),
            Money::new(amount, Currency::USD),
            ExpenseCategory::Meals,
            "Lunch while visiting the Springfield office",
            expense_date,
            Some(receipt_id),
        )
        .unwrap();

        assert_pending(&claim);
        assert_money_eq(&claim.amount, &Money::new(dec!(12.90), Currency::USD));
        assert_eq!(claim.expense_date, expense_date);
        assert_eq!(claim.receipt, Some(receipt_id));
    }

    /// Garbled recognition output still allows manual submission
    #[tokio::test]
    async fn test_garbled_receipt_falls_back_to_manual_entry() {
        let recognition = StubRecognition::returning(ReceiptTextFixtures::garbled());
        let text = recognition.recognize(b"blurry").await.unwrap();

        let fields = FieldExtractor::new().extract(&text);
        assert_eq!(fields.amount, None);
        assert_eq!(fields.date, None);

        // The submitter types everything by hand instead
        let claim = ExpenseClaim::submit(
            UserId::new(),
            Money::new(dec!(42.00), Currency::USD),
            ExpenseCategory::Other,
            "Printer cable for the front desk",
            TemporalFixtures::expense_date(),
            None,
        )
        .unwrap();

        assert_pending(&claim);
    }
}

mod review_workflow {
    use super::*;

    async fn reviewer_from_directory(directory: &MemoryRoleDirectory, user: UserId) -> Actor {
        let assignments = directory.assignments_for(user).await.unwrap();
        Actor::from_assignments(user, &assignments)
    }

    /// Tests a submission reviewed through the store's guarded update
    #[tokio::test]
    async fn test_submit_then_approve_through_store() {
        let store = MemoryClaimStore::new();
        let directory = MemoryRoleDirectory::new();

        let employee = UserId::new();
        let manager = UserId::new();
        directory.grant(manager, Role::Manager).await;

        let claim = ExpenseClaim::submit(
            employee,
            Money::new(dec!(180.00), Currency::USD),
            ExpenseCategory::Accommodation,
            "Hotel night for the customer workshop",
            TemporalFixtures::expense_date(),
            None,
        )
        .unwrap();
        let claim = store.insert(claim).await.unwrap();

        let actor = reviewer_from_directory(&directory, manager).await;
        let mut decided = store.get(claim.id).await.unwrap();
        let observed = decided.status;
        decided.transition(ClaimStatus::Approved, &actor).unwrap();

        let stored = store
            .apply_review(claim.id, observed, ReviewUpdate::from_claim(&decided))
            .await
            .unwrap();

        assert_decided(&stored, ClaimStatus::Approved, manager);
    }

    /// An employee resolved through the directory cannot review at all
    #[tokio::test]
    async fn test_directory_resolved_employee_is_refused() {
        let directory = MemoryRoleDirectory::new();
        let employee = UserId::new();
        directory.grant(employee, Role::Employee).await;

        let actor = reviewer_from_directory(&directory, employee).await;
        let mut claim = TestClaimBuilder::new().build();

        assert!(claim.transition(ClaimStatus::Approved, &actor).is_err());
        assert_pending(&claim);
    }

    /// Reimbursement is an out-of-band accounting step over the same store
    #[tokio::test]
    async fn test_accounting_reimburses_an_approved_claim() {
        let store = MemoryClaimStore::new();
        let manager = UserId::new();

        let claim = TestClaimBuilder::new().build();
        let claim = store.insert(claim).await.unwrap();

        let reviewer = Actor::new(manager, domain_identity::CapabilitySet::reviewer());
        let mut approved = store.get(claim.id).await.unwrap();
        approved.transition(ClaimStatus::Approved, &reviewer).unwrap();
        store
            .apply_review(claim.id, ClaimStatus::Pending, ReviewUpdate::from_claim(&approved))
            .await
            .unwrap();

        // Later, the payment batch marks it reimbursed
        let accounting = Actor::new(UserId::new(), domain_identity::CapabilitySet::reviewer());
        let mut paid = store.get(claim.id).await.unwrap();
        paid.transition(ClaimStatus::Reimbursed, &accounting).unwrap();
        let stored = store
            .apply_review(claim.id, ClaimStatus::Approved, ReviewUpdate::from_claim(&paid))
            .await
            .unwrap();

        assert_eq!(stored.status, ClaimStatus::Reimbursed);
        // The original reviewer stays on record
        assert_eq!(stored.reviewer_id, Some(manager));
    }

    /// Listings come back newest first for both views
    #[tokio::test]
    async fn test_listings_are_newest_first() {
        let store = MemoryClaimStore::new();
        let submitter = UserId::new();

        let older = TestClaimBuilder::new()
            .with_submitter(submitter)
            .with_created_at(TemporalFixtures::submitted_at())
            .build();
        let newer = TestClaimBuilder::new()
            .with_submitter(submitter)
            .with_created_at(TemporalFixtures::submitted_next_day())
            .build();

        store.insert(older.clone()).await.unwrap();
        store.insert(newer.clone()).await.unwrap();

        let mine = store.list_for_submitter(submitter).await.unwrap();
        assert_eq!(mine[0].id, newer.id);
        assert_eq!(mine[1].id, older.id);

        let all = store.list_all().await.unwrap();
        assert_eq!(all[0].id, newer.id);
    }
}

mod dashboard_workflow {
    use super::*;

    /// The dashboard counters over a freshly reviewed claim set
    #[tokio::test]
    async fn test_summary_over_store_contents() {
        let store = MemoryClaimStore::with_claims(vec![
            TestClaimBuilder::new()
                .with_amount(Money::new(dec!(10), Currency::USD))
                .build(),
            TestClaimBuilder::new()
                .with_amount(Money::new(dec!(20), Currency::USD))
                .with_status(ClaimStatus::Approved)
                .build(),
            TestClaimBuilder::new()
                .with_amount(Money::new(dec!(5), Currency::USD))
                .with_status(ClaimStatus::Rejected)
                .build(),
            TestClaimBuilder::new()
                .with_amount(Money::new(dec!(15), Currency::USD))
                .with_status(ClaimStatus::Reimbursed)
                .build(),
        ])
        .await;

        let summary = ClaimSummary::of(&store.list_all().await.unwrap());

        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.approved_count, 2);
        assert_eq!(summary.rejected_count, 1);
        assert_money_eq(&summary.total_amount, &Money::new(dec!(50), Currency::USD));
    }
}

mod summary_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn summary_counts_partition_any_claim_set(
            claims in proptest::collection::vec(claim_strategy(), 0..40)
        ) {
            let summary = ClaimSummary::of(&claims);

            prop_assert_eq!(
                summary.pending_count + summary.approved_count + summary.rejected_count,
                claims.len()
            );
        }

        #[test]
        fn summary_total_sums_every_claim(
            claims in proptest::collection::vec(claim_strategy(), 0..40)
        ) {
            let summary = ClaimSummary::of(&claims);

            let expected = claims
                .iter()
                .fold(Money::zero(Currency::USD), |acc, c| acc + c.amount);
            prop_assert_eq!(summary.total_amount, expected);
        }
    }
}
