//! Core Kernel - Foundational types and utilities for the expense system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Port abstractions for external collaborators

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{ClaimId, UserId, ReceiptId};
pub use ports::{PortError, DomainPort};
