//! Slice one section out of the statement lines and tokenize it.

use tracing::{debug, warn};

use crate::anchor::{locate, locate_from};
use crate::patterns::SectionAnchors;
use crate::tokenizer::tokenize;
use crate::types::{RawTransaction, TransactionType};

/// Outcome of extracting one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionExtraction {
    pub transaction_type: TransactionType,
    /// Tokenized rows in document order.
    pub records: Vec<RawTransaction>,
    /// Lines inside the section that did not tokenize.
    pub rejected: usize,
    /// False when the start anchor never appears (e.g. no interest this period).
    pub found: bool,
    /// True when the end anchor was missing and the section ran to end of input.
    pub truncated: bool,
}

impl SectionExtraction {
    fn absent(transaction_type: TransactionType) -> Self {
        Self {
            transaction_type,
            records: Vec::new(),
            rejected: 0,
            found: false,
            truncated: false,
        }
    }
}

/// Extract the rows between `anchors.start` (exclusive) and `anchors.end` (exclusive).
///
/// A missing start anchor yields no rows. A missing end anchor takes every
/// remaining line. Lines that fail to tokenize are counted and skipped.
pub fn extract_section(
    lines: &[&str],
    anchors: &SectionAnchors,
    ty: TransactionType,
) -> SectionExtraction {
    let Some(header) = locate(lines, &anchors.start).ok().flatten() else {
        debug!(section = %ty, anchor = anchors.start.name(), "section not present");
        return SectionExtraction::absent(ty);
    };

    let start = header + 1;
    let (end, truncated) = match locate_from(lines, &anchors.end, start).ok().flatten() {
        Some(end) => (end, false),
        None => {
            warn!(
                section = %ty,
                anchor = anchors.end.name(),
                "end anchor missing, taking the rest of the statement"
            );
            (lines.len(), true)
        }
    };

    let mut records = Vec::new();
    let mut rejected = 0;
    for (offset, line) in lines[start..end].iter().enumerate() {
        match tokenize(line, ty) {
            Ok(raw) => records.push(raw),
            Err(reason) => {
                rejected += 1;
                debug!(section = %ty, line = start + offset, %reason, "skipping line");
            }
        }
    }

    SectionExtraction {
        transaction_type: ty,
        records,
        rejected,
        found: true,
        truncated,
    }
}
