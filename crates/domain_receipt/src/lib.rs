//! Receipt Intake Domain
//!
//! A photographed receipt is recognized into raw text by an external OCR
//! service; this crate turns that noisy text into candidate claim fields.
//! Extraction is best-effort by design: a field that cannot be found is
//! simply absent, never an error, and the submitter falls back to manual
//! entry.

pub mod extract;
pub mod ports;

pub use extract::{parse_expense_date, ExtractedFields, FieldExtractor};
pub use ports::{ReceiptVault, TextRecognition};
