//! Receipt extraction handlers

use axum::{extract::State, Extension, Json};

use domain_receipt::parse_expense_date;

use crate::auth::TokenClaims;
use crate::dto::receipts::{ExtractRequest, ExtractResponse};
use crate::AppState;

/// Extracts candidate claim fields from recognized receipt text
///
/// Always succeeds: fields that cannot be found come back empty and the
/// client falls back to manual entry. A date candidate that fails the
/// calendar parse is surfaced verbatim but yields no `expense_date`.
pub async fn extract_fields(
    State(state): State<AppState>,
    Extension(_token): Extension<TokenClaims>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    let fields = state.extractor.extract(&request.text);
    let expense_date = fields.date.as_deref().and_then(parse_expense_date);

    Json(ExtractResponse {
        amount: fields.amount,
        date: fields.date,
        expense_date,
    })
}
