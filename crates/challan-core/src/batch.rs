use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::derive::derive;
use crate::error::ChallanError;
use crate::extraction::{concatenate_pages, TextExtractor};
use crate::model::{BatchOutcome, ChallanRecord, DocumentWarning, WarningKind};
use crate::parsing::parse_document_text;
use crate::policy::schema::ChallanPolicy;

/// One uploaded document awaiting extraction.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Display name used in warnings, usually the file name.
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceDocument {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    pub policy: ChallanPolicy,
    /// Checked between documents; once set the batch ends after the current one.
    pub stop: Option<Arc<AtomicBool>>,
}

/// Records and warnings produced by a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentResult {
    pub records: Vec<ChallanRecord>,
    pub warnings: Vec<DocumentWarning>,
}

/// Run every document through extraction, segmentation and derivation.
///
/// A bad document never stops the batch: it is reported as a warning and the
/// next one is processed. Only a missing `pdftotext` binary aborts, since
/// every remaining PDF would fail the same way.
pub fn process(
    documents: &[SourceDocument],
    extractor: &dyn TextExtractor,
    options: &ProcessOptions,
) -> Result<BatchOutcome, ChallanError> {
    let mut outcome = BatchOutcome::default();

    for (i, doc) in documents.iter().enumerate() {
        if options
            .stop
            .as_ref()
            .is_some_and(|s| s.load(Ordering::Relaxed))
        {
            log::info!(
                "stop requested; {} of {} document(s) left unprocessed",
                documents.len() - i,
                documents.len()
            );
            outcome.stopped_early = true;
            break;
        }

        let result = match extractor
            .extract_pages(&doc.bytes)
            .and_then(|pages| concatenate_pages(&pages))
        {
            Ok(text) => process_text(&doc.name, &text, &options.policy),
            Err(ChallanError::PdftotextNotFound) => return Err(ChallanError::PdftotextNotFound),
            Err(e) => {
                log::warn!(
                    "{}: skipped ({} via {})",
                    doc.name,
                    e,
                    extractor.backend_name()
                );
                DocumentResult {
                    records: Vec::new(),
                    warnings: vec![DocumentWarning {
                        document: doc.name.clone(),
                        block_index: None,
                        kind: WarningKind::UnreadableDocument,
                        message: format!("{e}; needs alternate extraction (e.g. OCR)"),
                    }],
                }
            }
        };

        outcome.report.records.extend(result.records);
        outcome.warnings.extend(result.warnings);
        outcome.documents_processed += 1;
    }

    log::info!(
        "processed {} document(s): {} record(s), {} warning(s)",
        outcome.documents_processed,
        outcome.report.len(),
        outcome.warnings.len()
    );
    Ok(outcome)
}

/// Segment, extract and derive the challans of one document's text.
pub fn process_text(document: &str, text: &str, policy: &ChallanPolicy) -> DocumentResult {
    let mut result = DocumentResult::default();
    let warn = |block_index: Option<usize>, kind: WarningKind, message: String| DocumentWarning {
        document: document.to_string(),
        block_index,
        kind,
        message,
    };

    let parsed = parse_document_text(text);
    if parsed.is_empty() {
        log::warn!("{document}: no challan number marker found");
        result.warnings.push(warn(
            None,
            WarningKind::NoChallanFound,
            "no challan found in document text".into(),
        ));
        return result;
    }

    for pb in &parsed {
        let index = pb.block.index;
        match derive(&pb.fields, policy) {
            Ok(record) => {
                if record.reconciliation.is_mismatch() {
                    log::warn!("{document}: challan #{}: {}", index + 1, record.reconciliation);
                    result.warnings.push(warn(
                        Some(index),
                        WarningKind::ReconciliationMismatch,
                        record.reconciliation.to_string(),
                    ));
                }
                result.records.push(record);
            }
            Err(e) => {
                log::warn!("{document}: challan #{} rejected: {e}", index + 1);
                result
                    .warnings
                    .push(warn(Some(index), rejection_kind(&e), e.to_string()));
            }
        }
    }

    if result.records.is_empty() {
        result.warnings.push(warn(
            None,
            WarningKind::NoValidRecords,
            format!("none of {} challan(s) yielded a valid record", parsed.len()),
        ));
    }

    log::debug!(
        "{document}: {} block(s), {} record(s)",
        parsed.len(),
        result.records.len()
    );
    result
}

fn rejection_kind(e: &ChallanError) -> WarningKind {
    match e {
        ChallanError::DateOutOfRange(_) | ChallanError::AmountOutOfRange(_) => {
            WarningKind::ValueOutOfRange
        }
        _ => WarningKind::MissingRequiredField,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = "\
Financial Year : 2023-24
Date of Deposit : 07-May-2023
Challan No : 111
A Tax ₹ 10,000
D Interest ₹ 300
Total (A+B+C+D+E+F) ₹ 10,300";

    #[test]
    fn test_single_record() {
        let r = process_text("a.pdf", ONE, &ChallanPolicy::default());
        assert_eq!(r.records.len(), 1);
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_no_marker_warns_once() {
        let r = process_text("a.pdf", "Form 16 summary", &ChallanPolicy::default());
        assert!(r.records.is_empty());
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].kind, WarningKind::NoChallanFound);
    }

    #[test]
    fn test_rejected_block_and_no_valid_records() {
        let r = process_text(
            "a.pdf",
            "Challan No : 1\nTotal ₹ 100",
            &ChallanPolicy::default(),
        );
        assert!(r.records.is_empty());
        let kinds: Vec<WarningKind> = r.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::MissingRequiredField, WarningKind::NoValidRecords]
        );
        assert_eq!(r.warnings[0].block_index, Some(0));
    }

    #[test]
    fn test_mismatch_keeps_record() {
        let text = ONE.replace("₹ 10,300", "₹ 10,500");
        let r = process_text("a.pdf", &text, &ChallanPolicy::default());
        assert_eq!(r.records.len(), 1);
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].kind, WarningKind::ReconciliationMismatch);
    }

    #[test]
    fn test_out_of_range_block_does_not_stop_siblings() {
        let huge = "Challan No : 9\nDate of Deposit : 07-May-2023\n\
                    A Tax ₹ 50000000000000000000000000000\n\
                    B Surcharge ₹ 50000000000000000000000000000\n\
                    Total ₹ 1\n";
        let text = format!("{huge}{ONE}");
        let r = process_text("a.pdf", &text, &ChallanPolicy::default());

        assert_eq!(r.records.len(), 1);
        assert_eq!(r.records[0].challan_number.as_deref(), Some("111"));
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].kind, WarningKind::ValueOutOfRange);
        assert_eq!(r.warnings[0].block_index, Some(0));
    }

    #[test]
    fn test_absurd_delay_is_out_of_range() {
        let text = "Challan No : 1\nDate of Deposit : 07-May-2023\nA Tax ₹ 1\n\
                    D Interest ₹ 9,99,99,99,999\nTotal ₹ 10";
        let r = process_text("a.pdf", text, &ChallanPolicy::default());
        assert!(r.records.is_empty());
        assert_eq!(r.warnings[0].kind, WarningKind::ValueOutOfRange);
    }
}
