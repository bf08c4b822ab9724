//! Claims DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::Currency;
use domain_claims::{ClaimStatus, ClaimSummary, ExpenseCategory, ExpenseClaim};

#[derive(Debug, Deserialize)]
pub struct SubmitClaimRequest {
    pub amount: Decimal,
    /// Defaults to USD when omitted
    pub currency: Option<Currency>,
    pub category: ExpenseCategory,
    pub purpose: String,
    pub expense_date: NaiveDate,
    pub receipt_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ClaimStatus,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub submitter_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub category: ExpenseCategory,
    pub purpose: String,
    pub expense_date: NaiveDate,
    pub receipt_id: Option<Uuid>,
    pub status: ClaimStatus,
    pub reviewer_id: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<ExpenseClaim> for ClaimResponse {
    fn from(claim: ExpenseClaim) -> Self {
        Self {
            id: claim.id.into(),
            submitter_id: claim.submitter_id.into(),
            amount: claim.amount.amount(),
            currency: claim.amount.currency().code().to_string(),
            category: claim.category,
            purpose: claim.purpose,
            expense_date: claim.expense_date,
            receipt_id: claim.receipt.map(Into::into),
            status: claim.status,
            reviewer_id: claim.reviewer_id.map(Into::into),
            reviewed_at: claim.reviewed_at,
            created_at: claim.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub pending_count: usize,
    pub approved_count: usize,
    pub rejected_count: usize,
    pub total_amount: Decimal,
    pub currency: String,
}

impl From<ClaimSummary> for SummaryResponse {
    fn from(summary: ClaimSummary) -> Self {
        Self {
            pending_count: summary.pending_count,
            approved_count: summary.approved_count,
            rejected_count: summary.rejected_count,
            total_amount: summary.total_amount.amount(),
            currency: summary.total_amount.currency().code().to_string(),
        }
    }
}
