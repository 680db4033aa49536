use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Statement section a transaction was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Credit,
    Debit,
    Interest,
}

impl TransactionType {
    /// Extraction order used when assembling a statement.
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Credit,
        TransactionType::Debit,
        TransactionType::Interest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "Credit",
            TransactionType::Debit => "Debit",
            TransactionType::Interest => "Interest",
        }
    }

    /// Interest rows carry no reference/account columns.
    pub fn has_reference_columns(&self) -> bool {
        !matches!(self, TransactionType::Interest)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tokenized statement line, all fields exactly as they appeared in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub transaction_date: String,
    pub posting_date: String,
    pub description: String,
    pub reference_number: Option<String>,
    pub account_number: Option<String>,
    pub amount: String,
    pub transaction_type: TransactionType,
}

/// Final, fully resolved output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Transaction_Date")]
    pub transaction_date: NaiveDate,
    /// Raw `MM/DD` token; the posting year is never resolved.
    #[serde(rename = "Posting_Date")]
    pub posting_date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Reference_Number")]
    pub reference_number: Option<String>,
    #[serde(rename = "Account_Number")]
    pub account_number: Option<String>,
    /// Signed amount with thousands separators removed.
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Transaction_Type")]
    pub transaction_type: TransactionType,
}

/// Parsed rows of one or more statements, in column order [`StatementTable::COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementTable {
    rows: Vec<TransactionRecord>,
}

impl StatementTable {
    pub const COLUMNS: [&'static str; 7] = [
        "Transaction_Date",
        "Posting_Date",
        "Description",
        "Reference_Number",
        "Account_Number",
        "Amount",
        "Transaction_Type",
    ];

    pub fn new(rows: Vec<TransactionRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TransactionRecord] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<TransactionRecord> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append another statement's rows, keeping both orders intact.
    pub fn extend(&mut self, other: StatementTable) {
        self.rows.extend(other.rows);
    }

    pub fn of_type(&self, ty: TransactionType) -> impl Iterator<Item = &TransactionRecord> {
        self.rows.iter().filter(move |r| r.transaction_type == ty)
    }

    /// Sum of all amounts, rounded to cents.
    pub fn net_amount(&self) -> f64 {
        let total: f64 = self.rows.iter().map(|r| r.amount).sum();
        (total * 100.0).round() / 100.0
    }

    /// Sorted distinct `YYYY/MM` keys of the transaction dates.
    pub fn year_months(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|r| format!("{}/{:02}", r.transaction_date.year(), r.transaction_date.month()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<TransactionRecord> for StatementTable {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
