//! Error types for statement parsing.

use thiserror::Error;

/// Failures that abort parsing of a whole statement.
///
/// Problems confined to a single line never surface here; see
/// [`crate::tokenizer::LineRejection`].
#[derive(Error, Debug)]
pub enum StatementError {
    #[error("anchor search over empty input")]
    NotFound,

    #[error("malformed statement: {0}")]
    MalformedStatement(String),

    #[error("invalid pattern for {name}: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatementError>;
