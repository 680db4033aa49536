//! Parse many statement files, isolating failures per file.

use anyhow::{Context, Result};
use cardstmt_ingest::{StatementParser, StatementTable, TransactionType};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Per-file counts for `--summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub credits: usize,
    pub debits: usize,
    pub interest: usize,
    pub net_amount: f64,
    pub year_months: Vec<String>,
}

impl FileSummary {
    fn of(path: &Path, table: &StatementTable) -> Self {
        Self {
            path: path.to_path_buf(),
            credits: table.of_type(TransactionType::Credit).count(),
            debits: table.of_type(TransactionType::Debit).count(),
            interest: table.of_type(TransactionType::Interest).count(),
            net_amount: table.net_amount(),
            year_months: table.year_months(),
        }
    }

    pub fn rows(&self) -> usize {
        self.credits + self.debits + self.interest
    }
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Rows of every successfully parsed file, in input order.
    pub table: StatementTable,
    pub parsed: Vec<FileSummary>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

impl BatchReport {
    pub fn all_failed(&self) -> bool {
        self.parsed.is_empty() && !self.failed.is_empty()
    }
}

/// Text of a statement file: PDFs go through text extraction, anything else
/// is read as already-extracted text.
pub fn read_statement_text(path: &Path) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        return extract_pdf(path);
    }
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<String> {
    cardstmt_ingest::pdf::extract_pdf_text(path)
        .with_context(|| format!("extract text from {}", path.display()))
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> Result<String> {
    anyhow::bail!(
        "{}: PDF support not compiled in (enable the `pdf` feature)",
        path.display()
    )
}

pub fn parse_file(parser: &StatementParser, path: &Path) -> Result<StatementTable> {
    let text = read_statement_text(path)?;
    parser
        .parse(&text)
        .with_context(|| format!("parse {}", path.display()))
}

/// Parse every file; one bad statement never stops the rest.
pub fn process_files(parser: &StatementParser, paths: &[PathBuf]) -> BatchReport {
    let mut report = BatchReport::default();

    for path in paths {
        match parse_file(parser, path) {
            Ok(table) => {
                info!(file = %path.display(), rows = table.len(), "statement parsed");
                report.parsed.push(FileSummary::of(path, &table));
                report.table.extend(table);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(file = %path.display(), error = %reason, "skipping statement");
                report.failed.push((path.clone(), e));
            }
        }
    }

    report
}
