//! Table serialization for downstream consumers.

use std::io::Write;

use crate::error::Result;
use crate::types::StatementTable;

/// Write `table` as CSV with a header row in [`StatementTable::COLUMNS`] order.
/// Absent reference/account numbers become empty fields; amounts are written
/// to the cent.
pub fn write_csv<W: Write>(table: &StatementTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(StatementTable::COLUMNS)?;
    for row in table.rows() {
        wtr.write_record([
            row.transaction_date.to_string().as_str(),
            row.posting_date.as_str(),
            row.description.as_str(),
            row.reference_number.as_deref().unwrap_or(""),
            row.account_number.as_deref().unwrap_or(""),
            format!("{:.2}", row.amount).as_str(),
            row.transaction_type.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &StatementTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TransactionRecord, TransactionType};
    use chrono::NaiveDate;

    fn table() -> StatementTable {
        StatementTable::new(vec![
            TransactionRecord {
                transaction_date: NaiveDate::from_ymd_opt(2023, 11, 5).unwrap(),
                posting_date: "11/06".to_string(),
                description: "Coffee Shop".to_string(),
                reference_number: Some("1234567890".to_string()),
                account_number: Some("9876".to_string()),
                amount: 4.5,
                transaction_type: TransactionType::Debit,
            },
            TransactionRecord {
                transaction_date: NaiveDate::from_ymd_opt(2023, 11, 30).unwrap(),
                posting_date: "11/30".to_string(),
                description: "Purchase APR Interest Charge".to_string(),
                reference_number: None,
                account_number: None,
                amount: 15.23,
                transaction_type: TransactionType::Interest,
            },
        ])
    }

    #[test]
    fn test_csv_layout() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Transaction_Date,Posting_Date,Description,Reference_Number,Account_Number,Amount,Transaction_Type"
        );
        assert_eq!(lines[1], "2023-11-05,11/06,Coffee Shop,1234567890,9876,4.50,Debit");
        assert_eq!(lines[2], "2023-11-30,11/30,Purchase APR Interest Charge,,,15.23,Interest");
    }

    #[test]
    fn test_csv_amounts_keep_cents() {
        let mut rows = table().into_rows();
        rows[0].amount = -500.0;
        rows[1].amount = 1264.9;
        let mut out = Vec::new();
        write_csv(&StatementTable::new(rows), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let amounts: Vec<_> = text
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(5).unwrap())
            .collect();
        assert_eq!(amounts, vec!["-500.00", "1264.90"]);
    }

    #[test]
    fn test_json_amounts_stay_numeric() {
        let mut out = Vec::new();
        write_json(&table(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["Amount"], serde_json::json!(4.5));
    }

    #[test]
    fn test_csv_header_even_when_empty() {
        let mut out = Vec::new();
        write_csv(&StatementTable::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_json_is_array_of_rows() {
        let mut out = Vec::new();
        write_json(&table(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["Reference_Number"], serde_json::Value::Null);
    }
}
