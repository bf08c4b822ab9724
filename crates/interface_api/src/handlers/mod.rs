//! Request handlers

pub mod claims;
pub mod receipts;
pub mod health;
