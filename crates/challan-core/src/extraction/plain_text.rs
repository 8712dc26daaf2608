use crate::error::ChallanError;
use crate::extraction::pdftotext::split_pages;
use crate::extraction::{PageContent, TextExtractor};

/// Backend for text that was already extracted elsewhere (OCR output, saved
/// pdftotext dumps). Pages are separated by form feeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ChallanError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(split_pages(&text))
    }

    fn backend_name(&self) -> &str {
        "plain-text"
    }
}
