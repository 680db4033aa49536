//! Positional tokenizer for single transaction lines.
//!
//! Rows look like:
//!   11/05 11/06 Coffee Shop 1234567890 9876 4.50          (credit/debit)
//!   11/05 11/06 Purchase APR Interest Charge 15.23        (interest)

use thiserror::Error;

use crate::types::{RawTransaction, TransactionType};

/// Substrings marking page footers, column headers and section labels that
/// leak into a sliced section.
pub const BOILERPLATE_MARKERS: [&str; 9] = [
    "Page",
    "page",
    "Continue",
    "continue",
    "Number",
    "Amount",
    "Total",
    "Purchases",
    "Adjustments",
];

/// Why a line inside a section did not yield a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineRejection {
    #[error("blank line")]
    Blank,

    #[error("boilerplate marker {0:?}")]
    Boilerplate(&'static str),

    #[error("expected at least {required} tokens, found {found}")]
    TooFewTokens { found: usize, required: usize },
}

/// Minimum token count for a line of the given section.
pub fn min_tokens(ty: TransactionType) -> usize {
    if ty.has_reference_columns() { 5 } else { 3 }
}

pub fn boilerplate_marker(line: &str) -> Option<&'static str> {
    BOILERPLATE_MARKERS
        .iter()
        .copied()
        .find(|marker| line.contains(marker))
}

/// Decompose one line into a [`RawTransaction`].
pub fn tokenize(line: &str, ty: TransactionType) -> Result<RawTransaction, LineRejection> {
    if let Some(marker) = boilerplate_marker(line) {
        return Err(LineRejection::Boilerplate(marker));
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(LineRejection::Blank);
    }

    let required = min_tokens(ty);
    if tokens.len() < required {
        return Err(LineRejection::TooFewTokens {
            found: tokens.len(),
            required,
        });
    }

    let n = tokens.len();
    let (description_end, reference_number, account_number) = if ty.has_reference_columns() {
        (n - 3, Some(tokens[n - 3].to_string()), Some(tokens[n - 2].to_string()))
    } else {
        (n - 1, None, None)
    };

    Ok(RawTransaction {
        transaction_date: tokens[0].to_string(),
        posting_date: tokens[1].to_string(),
        description: tokens[2..description_end].join(" "),
        reference_number,
        account_number,
        amount: tokens[n - 1].to_string(),
        transaction_type: ty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_line() {
        let raw = tokenize(
            "11/05 11/06 Purchase APR Interest Charge 15.23",
            TransactionType::Interest,
        )
        .unwrap();
        assert_eq!(raw.transaction_date, "11/05");
        assert_eq!(raw.posting_date, "11/06");
        assert_eq!(raw.description, "Purchase APR Interest Charge");
        assert_eq!(raw.amount, "15.23");
        assert_eq!(raw.reference_number, None);
        assert_eq!(raw.account_number, None);
    }

    #[test]
    fn test_debit_line() {
        let raw = tokenize(
            "11/05 11/06 Coffee Shop 1234567890 9876 4.50",
            TransactionType::Debit,
        )
        .unwrap();
        assert_eq!(raw.description, "Coffee Shop");
        assert_eq!(raw.reference_number.as_deref(), Some("1234567890"));
        assert_eq!(raw.account_number.as_deref(), Some("9876"));
        assert_eq!(raw.amount, "4.50");
        assert_eq!(raw.transaction_type, TransactionType::Debit);
    }

    #[test]
    fn test_irregular_whitespace_collapses() {
        let raw = tokenize(
            "  11/03\t11/03   PAYMENT   THANK YOU  7412589630 1234   -1,500.00 ",
            TransactionType::Credit,
        )
        .unwrap();
        assert_eq!(raw.description, "PAYMENT THANK YOU");
        assert_eq!(raw.amount, "-1,500.00");
    }

    #[test]
    fn test_page_marker_rejected_for_every_section() {
        for ty in TransactionType::ALL {
            assert_eq!(
                tokenize("11/05 11/06 Page 2 of 5 1234 5678 9.99", ty),
                Err(LineRejection::Boilerplate("Page"))
            );
        }
    }

    #[test]
    fn test_column_header_rejected() {
        assert_eq!(
            tokenize("Date Date Description Reference Number Account Number Amount", TransactionType::Debit),
            Err(LineRejection::Boilerplate("Number"))
        );
    }

    #[test]
    fn test_short_lines_rejected_not_panicking() {
        assert_eq!(
            tokenize("11/05 11/06 Coffee 4.50", TransactionType::Credit),
            Err(LineRejection::TooFewTokens { found: 4, required: 5 })
        );
        assert_eq!(
            tokenize("11/05 15.23", TransactionType::Interest),
            Err(LineRejection::TooFewTokens { found: 2, required: 3 })
        );
        assert_eq!(tokenize("   ", TransactionType::Interest), Err(LineRejection::Blank));
    }

    #[test]
    fn test_minimum_interest_line_has_empty_description() {
        let raw = tokenize("11/05 11/06 15.23", TransactionType::Interest).unwrap();
        assert_eq!(raw.description, "");
        assert_eq!(raw.amount, "15.23");
    }
}
