pub mod batch;
pub mod derive;
pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod policy;
pub mod report;
pub mod trace;

use batch::{DocumentResult, ProcessOptions, SourceDocument};
use error::ChallanError;
use extraction::TextExtractor;
use model::BatchOutcome;
use policy::schema::ChallanPolicy;

/// Main API entry point: turn a batch of challan documents into one report.
///
/// Each document may hold several challans. Records keep document order,
/// then order of appearance within the document. Per-document problems are
/// returned as warnings alongside the report.
pub fn process_documents(
    documents: &[SourceDocument],
    extractor: &dyn TextExtractor,
    options: &ProcessOptions,
) -> Result<BatchOutcome, ChallanError> {
    batch::process(documents, extractor, options)
}

/// Process already-extracted text, e.g. a pre-converted `.txt` receipt.
pub fn parse_text(document: &str, text: &str, policy: &ChallanPolicy) -> DocumentResult {
    batch::process_text(document, text, policy)
}
