//! Heuristic field extraction from OCR text
//!
//! Receipts come back from recognition as a single unstructured blob. The
//! extractor scans it for the first token that looks like a monetary amount
//! and the first token that looks like a calendar date. Taking the first
//! match is deliberate: a receipt with a subtotal line above the total will
//! surface the subtotal, and the submitter corrects it in the form.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Candidate fields extracted from one recognized text blob
///
/// Ephemeral: consumed to pre-populate a draft claim, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Amount candidate, normalized to a `.` decimal separator
    pub amount: Option<String>,
    /// Date candidate, verbatim as matched
    pub date: Option<String>,
    /// The full recognized text the candidates came from
    pub raw_text: String,
}

/// Scans recognized receipt text for amount and date candidates
pub struct FieldExtractor {
    amount_pattern: Regex,
    date_pattern: Regex,
}

impl FieldExtractor {
    /// Creates an extractor with the standard receipt patterns
    pub fn new() -> Self {
        Self {
            // Optional currency marker, digits, decimal separator, two digits
            amount_pattern: Regex::new(r"[$€£¥]?\s*(\d+[.,]\d{2})").unwrap(),
            // Day-or-month-first (ambiguous on purpose) or year-first
            date_pattern: Regex::new(r"(\d{1,2}[-/]\d{1,2}[-/]\d{2,4})|(\d{4}[-/]\d{1,2}[-/]\d{1,2})")
                .unwrap(),
        }
    }

    /// Extracts candidate fields from recognized text
    ///
    /// Always succeeds; a field that does not appear in the text is `None`.
    /// Only the first match in document order is used for each field.
    pub fn extract(&self, raw_text: &str) -> ExtractedFields {
        let amount = self
            .amount_pattern
            .captures(raw_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().replace(',', "."));

        let date = self
            .date_pattern
            .find(raw_text)
            .map(|m| m.as_str().to_string());

        tracing::debug!(
            amount = amount.as_deref(),
            date = date.as_deref(),
            text_len = raw_text.len(),
            "Extracted receipt fields"
        );

        ExtractedFields {
            amount,
            date,
            raw_text: raw_text.to_string(),
        }
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempts a generic calendar parse of a date candidate
///
/// Extraction leaves day/month ordering ambiguous; this is the caller-side
/// resolution step. Month-first is tried before day-first, so a candidate
/// like `04/05/2024` resolves to April 5th. A candidate that parses under
/// none of the known formats is dropped silently and the date is left for
/// manual entry.
pub fn parse_expense_date(candidate: &str) -> Option<NaiveDate> {
    let candidate = candidate.trim();
    let segments: Vec<&str> = candidate.split(['-', '/']).collect();
    if segments.len() != 3 {
        return None;
    }

    // The segment shape picks the format family; chrono's %Y would otherwise
    // happily read "24" as the year 24 AD.
    let formats: &[&str] = if segments[0].len() == 4 {
        &["%Y-%m-%d", "%Y/%m/%d"]
    } else if segments[2].len() == 2 {
        &["%m/%d/%y", "%m-%d-%y", "%d/%m/%y", "%d-%m-%y"]
    } else {
        &["%m/%d/%Y", "%m-%d-%Y", "%d/%m/%Y", "%d-%m-%Y"]
    };

    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(candidate, format).ok())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extraction_never_panics(text in ".{0,400}") {
            let extractor = FieldExtractor::new();
            let _ = extractor.extract(&text);
        }

        #[test]
        fn embedded_amount_is_found(
            prefix in "[a-zA-Z ]{0,40}",
            dollars in 1u32..100_000u32,
            cents in 0u32..100u32
        ) {
            let text = format!("{}${}.{:02}", prefix, dollars, cents);
            let extractor = FieldExtractor::new();
            let fields = extractor.extract(&text);

            prop_assert_eq!(fields.amount, Some(format!("{}.{:02}", dollars, cents)));
        }

        #[test]
        fn extracted_amount_matches_shape(text in ".{0,400}") {
            let extractor = FieldExtractor::new();
            if let Some(amount) = extractor.extract(&text).amount {
                let (whole, frac) = amount.split_once('.').expect("normalized separator");
                prop_assert!(!whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit()));
                prop_assert_eq!(frac.len(), 2);
                prop_assert!(frac.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
