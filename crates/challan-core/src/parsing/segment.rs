use regex::Regex;
use std::sync::LazyLock;

use crate::model::ChallanBlock;
use crate::parsing::fields::{
    AMOUNT_LABEL, CHALLAN_NO_LABEL, DEPOSIT_DATE_LABEL, FINANCIAL_YEAR_LABEL, NATURE_LABEL,
    TOTAL_AMOUNT,
};

static CHALLAN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i){CHALLAN_NO_LABEL}\s*:?\s*\d"))
        .expect("built-in challan marker pattern is valid")
});

static TOTAL_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOTAL_AMOUNT).expect("built-in total marker pattern is valid"));

/// First label of a receipt's preamble.
static PREAMBLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i){FINANCIAL_YEAR_LABEL}|{NATURE_LABEL}|{DEPOSIT_DATE_LABEL}|{AMOUNT_LABEL}"
    ))
    .expect("built-in preamble marker pattern is valid")
});

/// Split a document's text into one block per challan receipt.
///
/// Each block is anchored at a "Challan No" marker and closes at the first
/// numeric total before the next marker. The preamble printed ahead of a
/// marker (financial year, nature, deposit date) is carried by the block
/// that follows it; anything between the previous total and that preamble,
/// such as the amount in words, is dropped. Text with no marker yields no
/// blocks.
pub fn segment(document_text: &str) -> Vec<ChallanBlock> {
    let markers: Vec<usize> = CHALLAN_MARKER
        .find_iter(document_text)
        .map(|m| m.start())
        .collect();

    let mut blocks = Vec::with_capacity(markers.len());
    let mut prev_end = 0;

    for (i, &marker) in markers.iter().enumerate() {
        let window_end = markers.get(i + 1).copied().unwrap_or(document_text.len());
        let window = &document_text[marker..window_end];

        let end = match TOTAL_MARKER.find(window) {
            Some(total) => marker + total.end(),
            None => {
                log::debug!("challan at offset {marker} has no total marker");
                window_end
            }
        };

        let start = PREAMBLE_MARKER
            .find(&document_text[prev_end..marker])
            .map_or(marker, |m| prev_end + m.start());
        if start > prev_end {
            log::debug!("dropped {} byte(s) ahead of challan #{}", start - prev_end, i + 1);
        }

        blocks.push(ChallanBlock {
            index: i,
            text: document_text[start..end].to_string(),
        });
        prev_end = end;
    }

    log::debug!("segmented document into {} block(s)", blocks.len());
    blocks
}
