pub mod fields;
pub mod segment;
pub mod values;

use crate::model::ChallanBlock;
use fields::ExtractedFields;

pub use fields::{extract, Field};
pub use segment::segment;

/// A block together with the raw fields found in it.
#[derive(Debug, Clone)]
pub struct ParsedBlock {
    pub block: ChallanBlock,
    pub fields: ExtractedFields,
}

/// Segment a document's text and extract fields from every block.
pub fn parse_document_text(text: &str) -> Vec<ParsedBlock> {
    segment(text)
        .into_iter()
        .map(|block| {
            let fields = extract(&block.text);
            ParsedBlock { block, fields }
        })
        .collect()
}
