//! Claim aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, Money, ReceiptId, UserId};
use domain_identity::Actor;

use crate::error::ClaimError;

/// Minimum length for the free-text purpose field
const MIN_PURPOSE_LEN: usize = 5;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Submitted, awaiting review
    Pending,
    /// Approved by a reviewer, awaiting reimbursement
    Approved,
    /// Rejected by a reviewer
    Rejected,
    /// Paid out by accounting
    Reimbursed,
}

impl ClaimStatus {
    /// Returns the persisted name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Reimbursed => "reimbursed",
        }
    }

    /// Returns true if no further transition leaves this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Reimbursed)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            "reimbursed" => Ok(ClaimStatus::Reimbursed),
            other => Err(ClaimError::validation(format!(
                "Unknown claim status: {other}"
            ))),
        }
    }
}

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Travel,
    Meals,
    Accommodation,
    Transportation,
    Supplies,
    Entertainment,
    Other,
}

impl ExpenseCategory {
    /// Returns the persisted name of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Travel => "travel",
            ExpenseCategory::Meals => "meals",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "travel" => Ok(ExpenseCategory::Travel),
            "meals" => Ok(ExpenseCategory::Meals),
            "accommodation" => Ok(ExpenseCategory::Accommodation),
            "transportation" => Ok(ExpenseCategory::Transportation),
            "supplies" => Ok(ExpenseCategory::Supplies),
            "entertainment" => Ok(ExpenseCategory::Entertainment),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(ClaimError::validation(format!(
                "Unknown expense category: {other}"
            ))),
        }
    }
}

/// A submitted expense claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseClaim {
    /// Unique identifier
    pub id: ClaimId,
    /// Owning user
    pub submitter_id: UserId,
    /// Claimed amount
    pub amount: Money,
    /// Expense category
    pub category: ExpenseCategory,
    /// Free-text justification
    pub purpose: String,
    /// Date the expense occurred
    pub expense_date: NaiveDate,
    /// Reference to the uploaded receipt artifact, if any
    pub receipt: Option<ReceiptId>,
    /// Status
    pub status: ClaimStatus,
    /// Reviewer who decided the claim; set when status first leaves pending
    pub reviewer_id: Option<UserId>,
    /// When the claim was decided
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl ExpenseClaim {
    /// Creates a new pending claim, validating the submitted fields
    ///
    /// The amount must be strictly positive and the purpose at least five
    /// characters; violations surface before any persistence attempt.
    pub fn submit(
        submitter_id: UserId,
        amount: Money,
        category: ExpenseCategory,
        purpose: impl Into<String>,
        expense_date: NaiveDate,
        receipt: Option<ReceiptId>,
    ) -> Result<Self, ClaimError> {
        let purpose = purpose.into();

        if !amount.is_positive() {
            return Err(ClaimError::validation("Amount must be positive"));
        }
        if purpose.trim().len() < MIN_PURPOSE_LEN {
            return Err(ClaimError::validation(format!(
                "Purpose must be at least {MIN_PURPOSE_LEN} characters"
            )));
        }

        Ok(Self {
            id: ClaimId::new_v7(),
            submitter_id,
            amount,
            category,
            purpose,
            expense_date,
            receipt,
            status: ClaimStatus::Pending,
            reviewer_id: None,
            reviewed_at: None,
            created_at: Utc::now(),
        })
    }

    /// Moves the claim to a new status on behalf of the acting user
    ///
    /// The actor must hold review authority, and the target must be legal
    /// from the current status: pending claims can be approved or rejected,
    /// approved claims can be reimbursed, and terminal claims accept
    /// nothing. On leaving pending, the status, reviewer, and review
    /// timestamp change together; a failed transition leaves the claim
    /// untouched.
    pub fn transition(&mut self, target: ClaimStatus, actor: &Actor) -> Result<(), ClaimError> {
        if !actor.can_review() {
            return Err(ClaimError::NotAuthorized {
                user: actor.id.to_string(),
            });
        }
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: target.to_string(),
            });
        }

        if self.status == ClaimStatus::Pending {
            self.reviewer_id = Some(actor.id);
            self.reviewed_at = Some(Utc::now());
        }
        self.status = target;

        tracing::info!(
            claim = %self.id,
            status = %self.status,
            reviewer = %actor.id,
            "Claim status changed"
        );
        Ok(())
    }

    /// Checks if transition is valid
    fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Pending, Approved) | (Pending, Rejected) | (Approved, Reimbursed)
        )
    }

    /// Returns true if the claim still awaits a decision
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }
}
