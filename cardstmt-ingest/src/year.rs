//! Statement year resolution.
//!
//! Transaction rows carry `MM/DD` only; the year comes from the printed
//! statement period, e.g. `December 1, 2023 - January 31, 2024`.

use chrono::NaiveDate;

use crate::anchor::{Anchor, locate};
use crate::error::{Result, StatementError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementYear {
    /// Year printed at the end of the statement period.
    pub year: i32,
    /// Period runs from December into January; December rows belong to `year - 1`.
    pub december_rollover: bool,
}

impl StatementYear {
    /// Year to attach to a raw `MM/DD` date.
    pub fn year_for(&self, raw_date: &str) -> i32 {
        if self.december_rollover && raw_date.contains("12/") {
            self.year - 1
        } else {
            self.year
        }
    }

    /// Full date for a raw `MM/DD` token, or `None` if it is not a real date.
    pub fn resolve_date(&self, raw_date: &str) -> Option<NaiveDate> {
        let mut parts = raw_date.trim().split('/');
        let month: u32 = parts.next()?.parse().ok()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year_for(raw_date), month, day)
    }
}

/// Find the statement period line and read the year off its last token.
pub fn resolve_year(lines: &[&str], period: &Anchor) -> Result<StatementYear> {
    let index = locate(lines, period)
        .ok()
        .flatten()
        .ok_or_else(|| StatementError::MalformedStatement("statement period not found".to_string()))?;
    let line = lines[index];

    let token = line
        .split_whitespace()
        .last()
        .unwrap_or_default()
        .trim_matches(|c: char| !c.is_ascii_digit());
    let year: i32 = token
        .parse()
        .ok()
        .filter(|_| token.len() == 4)
        .ok_or_else(|| {
            StatementError::MalformedStatement(format!("no year at end of period line {line:?}"))
        })?;

    Ok(StatementYear {
        year,
        december_rollover: line.contains("December") && line.contains("January"),
    })
}
