//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the expense
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{ClaimId, Currency, Money, ReceiptId, UserId};
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A typical lunch-sized expense
    pub fn usd_25() -> Money {
        Money::new(dec!(25.00), Currency::USD)
    }

    /// A hotel-night-sized expense
    pub fn usd_180() -> Money {
        Money::new(dec!(180.00), Currency::USD)
    }

    /// Zero, for aggregation edge cases
    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// A EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard expense date (Mar 14, 2024)
    pub fn expense_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
    }

    /// When the claim was submitted
    pub fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    /// A submission one day later, for ordering tests
    pub fn submitted_next_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 16, 9, 30, 0).unwrap()
    }

    /// When the claim was decided
    pub fn reviewed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 18, 14, 0, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic claim ID for testing
    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic submitter ID for testing
    pub fn submitter_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic reviewer ID for testing
    pub fn reviewer_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic receipt ID for testing
    pub fn receipt_id() -> ReceiptId {
        ReceiptId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }
}

/// Fixture for recognized receipt text
pub struct ReceiptTextFixtures;

impl ReceiptTextFixtures {
    /// A clean US diner receipt
    pub fn diner() -> &'static str {
        "MARIO'S DINER\n123 Main Street\n03/14/2024 12:41\nLunch Special  $ 12.90\nTOTAL          $ 12.90\nThank you!"
    }

    /// A European hotel receipt with comma decimals and day-first date
    pub fn hotel_eu() -> &'static str {
        "Hotel Adler\nRechnung 4711\n14-03-2024\nSumme 118,00 EUR"
    }

    /// Recognition output with nothing usable in it
    pub fn garbled() -> &'static str {
        "~~ §§ unreadable scan output ~~"
    }
}
