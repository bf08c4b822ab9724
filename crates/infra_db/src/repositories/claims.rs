//! Claims repository
//!
//! Database access for the expense claim lifecycle, backed by the
//! `expense_claims` table:
//!
//! ```sql
//! CREATE TABLE expense_claims (
//!     id            UUID PRIMARY KEY,
//!     submitter_id  UUID        NOT NULL,
//!     amount        NUMERIC     NOT NULL,
//!     currency      TEXT        NOT NULL,
//!     category      TEXT        NOT NULL,
//!     purpose       TEXT        NOT NULL,
//!     expense_date  DATE        NOT NULL,
//!     receipt_id    UUID,
//!     status        TEXT        NOT NULL,
//!     reviewer_id   UUID,
//!     reviewed_at   TIMESTAMPTZ,
//!     created_at    TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use core_kernel::{ClaimId, DomainPort, Money, PortError, ReceiptId, UserId};
use domain_claims::{ClaimStatus, ClaimStore, ExpenseClaim, ReviewUpdate};

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = "id, submitter_id, amount, currency, category, purpose, \
     expense_date, receipt_id, status, reviewer_id, reviewed_at, created_at";

/// Repository for expense claim records
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    /// Creates a new repository on the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: ClaimId) -> Result<Option<ExpenseClaim>, DatabaseError> {
        let row = sqlx::query_as::<_, ExpenseClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM expense_claims WHERE id = $1"
        ))
        .bind(Uuid::from(id))
        .fetch_optional(&self.pool)
        .await?;

        row.map(ExpenseClaimRow::into_domain).transpose()
    }

    async fn persist(&self, claim: &ExpenseClaim) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO expense_claims (id, submitter_id, amount, currency, category, \
             purpose, expense_date, receipt_id, status, reviewer_id, reviewed_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
        )
        .bind(Uuid::from(claim.id))
        .bind(Uuid::from(claim.submitter_id))
        .bind(claim.amount.amount())
        .bind(claim.amount.currency().code())
        .bind(claim.category.as_str())
        .bind(&claim.purpose)
        .bind(claim.expense_date)
        .bind(claim.receipt.map(Uuid::from))
        .bind(claim.status.as_str())
        .bind(claim.reviewer_id.map(Uuid::from))
        .bind(claim.reviewed_at)
        .bind(claim.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, submitter: Option<UserId>) -> Result<Vec<ExpenseClaim>, DatabaseError> {
        let rows = match submitter {
            Some(submitter_id) => {
                sqlx::query_as::<_, ExpenseClaimRow>(&format!(
                    "SELECT {CLAIM_COLUMNS} FROM expense_claims \
                     WHERE submitter_id = $1 ORDER BY created_at DESC"
                ))
                .bind(Uuid::from(submitter_id))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ExpenseClaimRow>(&format!(
                    "SELECT {CLAIM_COLUMNS} FROM expense_claims ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter()
            .map(ExpenseClaimRow::into_domain)
            .collect()
    }

    /// Applies the review fields conditionally on the observed status
    ///
    /// The `AND status = $5` guard makes the write a compare-and-set: when a
    /// concurrent reviewer moved the claim first, zero rows match and the
    /// caller gets `ConcurrentUpdate` instead of a silent overwrite.
    async fn update_review(
        &self,
        id: ClaimId,
        expected: ClaimStatus,
        update: ReviewUpdate,
    ) -> Result<ExpenseClaim, DatabaseError> {
        let row = sqlx::query_as::<_, ExpenseClaimRow>(&format!(
            "UPDATE expense_claims \
             SET status = $1, reviewer_id = $2, reviewed_at = $3 \
             WHERE id = $4 AND status = $5 \
             RETURNING {CLAIM_COLUMNS}"
        ))
        .bind(update.status.as_str())
        .bind(update.reviewer_id.map(Uuid::from))
        .bind(update.reviewed_at)
        .bind(Uuid::from(id))
        .bind(expected.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.into_domain(),
            None => {
                let current =
                    sqlx::query_scalar::<_, String>("SELECT status FROM expense_claims WHERE id = $1")
                        .bind(Uuid::from(id))
                        .fetch_optional(&self.pool)
                        .await?;

                match current {
                    Some(status) => Err(DatabaseError::ConcurrentUpdate(format!(
                        "claim {} is {}, expected {}",
                        id, status, expected
                    ))),
                    None => Err(DatabaseError::not_found("ExpenseClaim", id)),
                }
            }
        }
    }
}

impl DomainPort for ClaimRepository {}

#[async_trait]
impl ClaimStore for ClaimRepository {
    async fn insert(&self, claim: ExpenseClaim) -> Result<ExpenseClaim, PortError> {
        if claim.status != ClaimStatus::Pending {
            return Err(PortError::validation(
                "New claims must be inserted as pending",
            ));
        }

        self.persist(&claim).await?;
        tracing::debug!(claim = %claim.id, "Inserted expense claim");
        Ok(claim)
    }

    async fn get(&self, id: ClaimId) -> Result<ExpenseClaim, PortError> {
        self.fetch(id)
            .await?
            .ok_or_else(|| PortError::not_found("ExpenseClaim", id))
    }

    async fn list_for_submitter(
        &self,
        submitter_id: UserId,
    ) -> Result<Vec<ExpenseClaim>, PortError> {
        Ok(self.list(Some(submitter_id)).await?)
    }

    async fn list_all(&self) -> Result<Vec<ExpenseClaim>, PortError> {
        Ok(self.list(None).await?)
    }

    async fn apply_review(
        &self,
        id: ClaimId,
        expected: ClaimStatus,
        update: ReviewUpdate,
    ) -> Result<ExpenseClaim, PortError> {
        match self.update_review(id, expected, update).await {
            Ok(claim) => Ok(claim),
            Err(e) if e.is_not_found() => Err(PortError::not_found("ExpenseClaim", id)),
            Err(e) => Err(e.into()),
        }
    }
}

/// Database row for an expense claim
#[derive(Debug, Clone, sqlx::FromRow)]
struct ExpenseClaimRow {
    id: Uuid,
    submitter_id: Uuid,
    amount: Decimal,
    currency: String,
    category: String,
    purpose: String,
    expense_date: NaiveDate,
    receipt_id: Option<Uuid>,
    status: String,
    reviewer_id: Option<Uuid>,
    reviewed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl ExpenseClaimRow {
    fn into_domain(self) -> Result<ExpenseClaim, DatabaseError> {
        let currency = self
            .currency
            .parse()
            .map_err(|e| DatabaseError::CorruptRecord(format!("currency: {e}")))?;
        let category = self
            .category
            .parse()
            .map_err(|e| DatabaseError::CorruptRecord(format!("category: {e}")))?;
        let status = self
            .status
            .parse()
            .map_err(|e| DatabaseError::CorruptRecord(format!("status: {e}")))?;

        Ok(ExpenseClaim {
            id: ClaimId::from(self.id),
            submitter_id: UserId::from(self.submitter_id),
            amount: Money::new(self.amount, currency),
            category,
            purpose: self.purpose,
            expense_date: self.expense_date,
            receipt: self.receipt_id.map(ReceiptId::from),
            status,
            reviewer_id: self.reviewer_id.map(UserId::from),
            reviewed_at: self.reviewed_at,
            created_at: self.created_at,
        })
    }
}
