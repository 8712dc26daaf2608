use crate::error::ChallanError;
use crate::extraction::{PageContent, TextExtractor};
use std::io::Write;
use std::process::Command;

/// Extraction backend using pdftotext (from poppler-utils).
///
/// Reading-order mode is the default since field patterns tolerate reflowed
/// text. `with_layout(true)` switches to `pdftotext -layout`.
#[derive(Debug, Clone, Default)]
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: false }
    }

    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl TextExtractor for PdftotextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, ChallanError> {
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ChallanError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(bytes)
            .map_err(|e| ChallanError::Extraction(e.to_string()))?;

        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        let output = cmd
            .arg("-enc")
            .arg("UTF-8")
            .arg(tmpfile.path())
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ChallanError::PdftotextNotFound
                } else {
                    ChallanError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ChallanError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);
        let pages = split_pages(&text);
        log::debug!(
            "pdftotext returned {} page(s), {} chars",
            pages.len(),
            text.len()
        );
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// Split extractor output into pages on the form feed separator.
///
/// pdftotext terminates every page with `\x0c`, so the empty tail after the
/// last separator is dropped.
pub(crate) fn split_pages(text: &str) -> Vec<PageContent> {
    let mut parts: Vec<&str> = text.split('\x0c').collect();
    if parts.len() > 1 && parts.last().is_some_and(|p| p.trim().is_empty()) {
        parts.pop();
    }
    parts
        .into_iter()
        .enumerate()
        .map(|(i, page_text)| PageContent {
            page_number: i + 1,
            text: Some(page_text.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_form_feed() {
        let pages = split_pages("page one\x0cpage two\x0c");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].text(), Some("page two"));
    }

    #[test]
    fn single_page_without_separator() {
        let pages = split_pages("only page");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text(), Some("only page"));
    }

    #[test]
    fn blank_pages_are_kept_but_yield_no_text() {
        let pages = split_pages("\x0c  \x0c");
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.text().is_none()));
    }
}
