pub mod pdftotext;
pub mod plain_text;

use crate::error::ChallanError;
use pdftotext::PdftotextExtractor;
use plain_text::PlainTextExtractor;

/// Text recovered from a single page of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub page_number: usize,
    pub text: Option<String>,
}

impl PageContent {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        PageContent {
            page_number,
            text: Some(text.into()),
        }
    }

    /// The page text, or `None` when it is absent or only whitespace.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Trait for text extraction backends.
pub trait TextExtractor: Send + Sync {
    /// Extract text content from document bytes, returning one PageContent per page.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ChallanError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Join the text of every page that has any.
///
/// Fails with [`ChallanError::EmptyText`] when no page yields text, which
/// usually means the document is a scan without a text layer.
pub fn concatenate_pages(pages: &[PageContent]) -> Result<String, ChallanError> {
    let texts: Vec<&str> = pages.iter().filter_map(|p| p.text()).collect();
    if texts.is_empty() {
        return Err(ChallanError::EmptyText);
    }
    Ok(texts.join("\n"))
}

/// Picks `pdftotext` for PDF input and plain text decoding for anything else.
#[derive(Default)]
pub struct AutoExtractor {
    pdf: PdftotextExtractor,
    text: PlainTextExtractor,
}

impl AutoExtractor {
    pub fn new(pdf: PdftotextExtractor) -> Self {
        AutoExtractor {
            pdf,
            text: PlainTextExtractor,
        }
    }

    fn is_pdf(bytes: &[u8]) -> bool {
        bytes.starts_with(b"%PDF-")
    }
}

impl TextExtractor for AutoExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ChallanError> {
        if Self::is_pdf(bytes) {
            self.pdf.extract_pages(bytes)
        } else {
            self.text.extract_pages(bytes)
        }
    }

    fn backend_name(&self) -> &str {
        "auto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_non_empty_pages() {
        let pages = vec![
            PageContent::new(1, "Challan No : 1"),
            PageContent {
                page_number: 2,
                text: None,
            },
            PageContent::new(3, "   "),
            PageContent::new(4, "Total ₹ 5"),
        ];
        assert_eq!(
            concatenate_pages(&pages).unwrap(),
            "Challan No : 1\nTotal ₹ 5"
        );
    }

    #[test]
    fn all_blank_pages_is_empty_text() {
        let pages = vec![PageContent::new(1, ""), PageContent::default()];
        assert!(matches!(
            concatenate_pages(&pages),
            Err(ChallanError::EmptyText)
        ));
    }

    #[test]
    fn auto_extractor_routes_plain_text() {
        let pages = AutoExtractor::default()
            .extract_pages(b"Financial Year : 2023-24")
            .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text(), Some("Financial Year : 2023-24"));
    }

    #[test]
    fn detects_pdf_magic() {
        assert!(AutoExtractor::is_pdf(b"%PDF-1.7\n..."));
        assert!(!AutoExtractor::is_pdf(b"Challan No"));
    }
}
