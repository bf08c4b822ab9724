//! Expense Claims Domain
//!
//! This crate implements the claim lifecycle from submission through review
//! to reimbursement.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -> Approved -> Reimbursed
//!         -> Rejected
//! ```
//!
//! Claims are created pending, leave pending exactly once through a
//! role-gated review decision, and never reopen once rejected or reimbursed.

pub mod claim;
pub mod summary;
pub mod ports;
pub mod error;

pub use claim::{ClaimStatus, ExpenseCategory, ExpenseClaim};
pub use summary::ClaimSummary;
pub use ports::{ClaimStore, ReviewUpdate};
pub use error::ClaimError;
