//! Line splitting and anchor search.
//!
//! Statement sections are delimited by boilerplate header/footer lines whose
//! wording is stable while the surrounding whitespace and page breaks are not,
//! so anchors are matched against the start of individual lines rather than
//! across the whole text blob.

use regex::Regex;

use crate::error::{Result, StatementError};

/// Split extracted statement text into lines, dropping any `\r` line endings.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// A boundary pattern matched at the start of a line.
///
/// `guard`, when present, vetoes a match if it matches the text immediately
/// following the prefix. It stands in for a negative lookahead, which the
/// `regex` crate does not support.
#[derive(Debug, Clone)]
pub struct Anchor {
    name: &'static str,
    prefix: Regex,
    guard: Option<Regex>,
}

impl Anchor {
    pub fn new(name: &'static str, pattern: &str, not_followed_by: Option<&str>) -> Result<Self> {
        let compile = |p: &str| {
            Regex::new(&format!("^(?:{p})"))
                .map_err(|source| StatementError::InvalidPattern { name, source })
        };

        Ok(Self {
            name,
            prefix: compile(pattern)?,
            guard: not_followed_by.map(compile).transpose()?,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if `line` starts with this anchor and the guard does not veto it.
    pub fn matches(&self, line: &str) -> bool {
        let Some(m) = self.prefix.find(line) else {
            return false;
        };
        match &self.guard {
            Some(guard) => !guard.is_match(&line[m.end()..]),
            None => true,
        }
    }
}

/// Index of the first line matching `anchor`, or `None` if no line does.
///
/// Searching an empty input is an error rather than a silent "not found".
pub fn locate(lines: &[&str], anchor: &Anchor) -> Result<Option<usize>> {
    locate_from(lines, anchor, 0)
}

/// Like [`locate`], but only considers lines at index `from` and later.
/// The returned index is absolute.
pub fn locate_from(lines: &[&str], anchor: &Anchor, from: usize) -> Result<Option<usize>> {
    if lines.is_empty() {
        return Err(StatementError::NotFound);
    }

    Ok(lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, line)| anchor.matches(line))
        .map(|(i, _)| i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_anchor() -> Anchor {
        Anchor::new(
            "credits_start",
            r"(Page \d+ of \d+)?Payments and Other Credits",
            Some(r"\s+-?\$\d+"),
        )
        .unwrap()
    }

    #[test]
    fn test_split_lines_strips_carriage_returns() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prefix_match_only() {
        let anchor = header_anchor();
        assert!(anchor.matches("Payments and Other Credits"));
        assert!(anchor.matches("Page 2 of 5Payments and Other Credits"));
        assert!(!anchor.matches("  Payments and Other Credits"));
        assert!(!anchor.matches("Total Payments and Other Credits"));
    }

    #[test]
    fn test_guard_rejects_summary_line() {
        let anchor = header_anchor();
        assert!(!anchor.matches("Payments and Other Credits -$1,200.00"));
        assert!(!anchor.matches("Payments and Other Credits $35.10"));
        assert!(anchor.matches("Payments and Other Credits (continued)"));
    }

    #[test]
    fn test_locate_first_match() {
        let anchor = header_anchor();
        let lines = vec![
            "Account Summary",
            "Payments and Other Credits -$500.00",
            "Payments and Other Credits",
            "Payments and Other Credits",
        ];
        assert_eq!(locate(&lines, &anchor).unwrap(), Some(2));
        assert_eq!(locate_from(&lines, &anchor, 3).unwrap(), Some(3));
    }

    #[test]
    fn test_locate_absent_is_none() {
        let anchor = header_anchor();
        let lines = vec!["nothing", "to see"];
        assert_eq!(locate(&lines, &anchor).unwrap(), None);
        assert_eq!(locate_from(&lines, &anchor, 10).unwrap(), None);
    }

    #[test]
    fn test_locate_empty_input_is_not_found() {
        let anchor = header_anchor();
        assert!(matches!(locate(&[], &anchor), Err(StatementError::NotFound)));
    }

    #[test]
    fn test_invalid_pattern_reports_name() {
        let err = Anchor::new("debits_end", "(unclosed", None).unwrap_err();
        assert!(matches!(err, StatementError::InvalidPattern { name: "debits_end", .. }));
    }
}
