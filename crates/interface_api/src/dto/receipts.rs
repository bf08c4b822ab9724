//! Receipt extraction DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Raw text returned by the recognition service
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    /// Amount candidate, normalized decimal separator
    pub amount: Option<String>,
    /// Date candidate as matched in the text
    pub date: Option<String>,
    /// The date candidate after the generic calendar parse, when it survives
    pub expense_date: Option<NaiveDate>,
}
