use std::path::PathBuf;

use crate::parsing::fields::Field;

#[derive(Debug, thiserror::Error)]
pub enum ChallanError {
    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no page yielded extractable text; the document likely needs OCR")]
    EmptyText,

    #[error("missing required field '{field}': {reason}")]
    MissingRequiredField { field: Field, reason: String },

    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("failed to load policy from {path}: {reason}")]
    PolicyLoad { path: PathBuf, reason: String },

    #[error("invalid policy: {0}")]
    PolicyInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
