//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use core_kernel::{ClaimId, Currency, Money, ReceiptId, UserId};
use domain_claims::{ClaimSummary, ExpenseClaim, ReviewUpdate};
use domain_identity::Actor;

use crate::auth::TokenClaims;
use crate::dto::claims::*;
use crate::error::ApiError;
use crate::AppState;

/// Reads the authenticated user id from the token claims
fn subject(token: &TokenClaims) -> Result<UserId, ApiError> {
    token.sub.parse().map_err(|_| ApiError::Unauthorized)
}

/// Builds the acting user by resolving their capabilities from the role
/// directory
async fn actor_for(state: &AppState, token: &TokenClaims) -> Result<Actor, ApiError> {
    let user_id = subject(token)?;
    let assignments = state.roles.assignments_for(user_id).await?;
    Ok(Actor::from_assignments(user_id, &assignments))
}

/// Submits a new expense claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let submitter = subject(&token)?;
    let currency = request.currency.unwrap_or(Currency::USD);

    // Validation happens here, before any persistence call
    let claim = ExpenseClaim::submit(
        submitter,
        Money::new(request.amount, currency),
        request.category,
        request.purpose,
        request.expense_date,
        request.receipt_id.map(ReceiptId::from),
    )?;

    let stored = state.claims.insert(claim).await?;
    Ok((StatusCode::CREATED, Json(stored.into())))
}

/// Lists the caller's own claims, newest first
pub async fn list_my_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let submitter = subject(&token)?;
    let claims = state.claims.list_for_submitter(submitter).await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Lists every claim for the review dashboard
pub async fn list_all_claims(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let actor = actor_for(&state, &token).await?;
    if !actor.can_review() {
        return Err(ApiError::Forbidden("Manager role required".to_string()));
    }

    let claims = state.claims.list_all().await?;
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Returns the dashboard summary over all claims
pub async fn claim_summary(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let actor = actor_for(&state, &token).await?;
    if !actor.can_review() {
        return Err(ApiError::Forbidden("Manager role required".to_string()));
    }

    let claims = state.claims.list_all().await?;
    Ok(Json(ClaimSummary::of(&claims).into()))
}

/// Applies a review decision to a claim
///
/// The domain transition validates authority and the status graph; the store
/// write is guarded by the status loaded here, so a concurrent decision on
/// the same claim surfaces as a conflict instead of a double review.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor_for(&state, &token).await?;
    let claim_id = ClaimId::from(id);

    let mut claim = state.claims.get(claim_id).await?;
    let observed = claim.status;

    claim.transition(request.status, &actor)?;

    let stored = state
        .claims
        .apply_review(claim_id, observed, ReviewUpdate::from_claim(&claim))
        .await?;

    Ok(Json(stored.into()))
}
