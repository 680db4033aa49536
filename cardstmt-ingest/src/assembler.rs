//! Statement assembly: sections → dated, cleaned [`StatementTable`].

use tracing::{debug, info};

use crate::anchor::split_lines;
use crate::error::Result;
use crate::patterns::{PatternSet, StatementLayout};
use crate::section::extract_section;
use crate::types::{RawTransaction, StatementTable, TransactionRecord, TransactionType};
use crate::year::{StatementYear, resolve_year};

/// Parses statement text for one layout. Holds no per-statement state, so a
/// single parser can be shared across threads.
#[derive(Debug, Clone)]
pub struct StatementParser {
    layout: StatementLayout,
}

impl StatementParser {
    pub fn new(patterns: &PatternSet) -> Result<Self> {
        Ok(Self {
            layout: patterns.compile()?,
        })
    }

    pub fn with_default_layout() -> Result<Self> {
        Self::new(&PatternSet::default())
    }

    pub fn layout(&self) -> &StatementLayout {
        &self.layout
    }

    /// Parse the full text of one statement.
    ///
    /// Fails only when the statement period (and so the year) cannot be found.
    pub fn parse(&self, text: &str) -> Result<StatementTable> {
        let lines = split_lines(text);
        let year = resolve_year(&lines, &self.layout.period)?;

        let mut raw = Vec::new();
        for ty in TransactionType::ALL {
            let section = extract_section(&lines, self.layout.section(ty), ty);
            debug!(
                section = %ty,
                found = section.found,
                rows = section.records.len(),
                rejected = section.rejected,
                "extracted section"
            );
            raw.extend(section.records);
        }

        let amounts = repair_amounts(&raw);
        let table: StatementTable = raw
            .into_iter()
            .zip(amounts)
            .filter_map(|(raw, amount)| finalize(raw, amount, &year))
            .collect();

        info!(
            year = year.year,
            december_rollover = year.december_rollover,
            rows = table.len(),
            "parsed statement"
        );
        Ok(table)
    }
}

/// Parse statement text with the built-in layout.
pub fn parse_statement_text(text: &str) -> Result<StatementTable> {
    StatementParser::with_default_layout()?.parse(text)
}

/// Strip thousands separators and whitespace, then parse. Only finite
/// values count, so words like `inf` or `NaN` never become amounts.
pub fn clean_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "")
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Resolve every row's amount in two passes.
///
/// Pass one parses each row on its own. Pass two fills a row that failed with
/// the next row's pass-one value; this recovers descriptions wrapped onto a
/// second line, where the amount lands on the continuation row.
pub fn repair_amounts(rows: &[RawTransaction]) -> Vec<Option<f64>> {
    let parsed: Vec<Option<f64>> = rows.iter().map(|r| clean_amount(&r.amount)).collect();

    parsed
        .iter()
        .enumerate()
        .map(|(i, amount)| amount.or_else(|| parsed.get(i + 1).copied().flatten()))
        .collect()
}

fn finalize(raw: RawTransaction, amount: Option<f64>, year: &StatementYear) -> Option<TransactionRecord> {
    let Some(transaction_date) = year.resolve_date(&raw.transaction_date) else {
        debug!(date = %raw.transaction_date, "dropping row with unresolvable date");
        return None;
    };
    if raw.description.trim().is_empty() {
        debug!(date = %raw.transaction_date, "dropping row without description");
        return None;
    }
    let Some(amount) = amount else {
        debug!(amount = %raw.amount, description = %raw.description, "dropping row with unresolved amount");
        return None;
    };

    Some(TransactionRecord {
        transaction_date,
        posting_date: raw.posting_date,
        description: raw.description,
        reference_number: raw.reference_number,
        account_number: raw.account_number,
        amount,
        transaction_type: raw.transaction_type,
    })
}
