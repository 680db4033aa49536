//! cardstmt-ingest: credit-card statement text → typed transaction table.
//!
//! Pipeline: split lines, resolve the statement year, slice the credit, debit
//! and interest sections between their anchors, tokenize each line, then date
//! and clean the rows.

pub mod anchor;
pub mod assembler;
pub mod error;
pub mod export;
pub mod patterns;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod section;
pub mod tokenizer;
pub mod types;
pub mod year;

pub use assembler::{StatementParser, parse_statement_text};
pub use error::{Result, StatementError};
pub use patterns::{AnchorSpec, PatternSet, SectionSpec};
pub use tokenizer::LineRejection;
pub use types::{RawTransaction, StatementTable, TransactionRecord, TransactionType};
pub use year::StatementYear;
