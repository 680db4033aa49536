//! Anchor patterns for the supported statement layout.
//!
//! The layout is plain data ([`PatternSet`]) so a template change means
//! editing patterns, usually through the CLI config file, not code.
//!
//! Expected extracted-text shape:
//!   November 1 - November 30, 2023
//!   ...
//!   Payments and Other Credits
//!   11/03 11/03 PAYMENT THANK YOU 7412589630 1234 -500.00
//!   TOTAL PAYMENTS AND OTHER CREDITS FOR THIS PERIOD -$500.00

use serde::{Deserialize, Serialize};

use crate::anchor::Anchor;
use crate::error::Result;
use crate::types::TransactionType;

pub const MONTH_GROUP: &str = r"(January|February|March|April|May|June|July|August|September|October|November|December)";

/// Rejects account-summary lines like `Interest Charged $12.40` as section headers.
pub const SECTION_TOTAL_GUARD: &str = r"\s+-?\$\d+";

pub const CREDITS_START: &str = r"(Page \d+ of \d+)?Payments and Other Credits";
pub const CREDITS_END: &str = r"TOTAL PAYMENTS AND OTHER CREDITS FOR THIS PERIOD\s+-?\$\d+";

pub const DEBITS_START: &str = r"(Page \d+ of \d+)?Purchases and Adjustments";
pub const DEBITS_END: &str = r"TOTAL PURCHASES AND ADJUSTMENTS FOR THIS PERIOD\s+-?\$\d+";

pub const INTEREST_START: &str = r"(Page \d+ of \d+)?Interest Charged";
pub const INTEREST_END: &str = r"TOTAL INTEREST CHARGED FOR THIS PERIOD\s+-?\$\d+";

/// Uncompiled anchor: prefix pattern plus optional veto on what follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorSpec {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_followed_by: Option<String>,
}

impl AnchorSpec {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            not_followed_by: None,
        }
    }

    pub fn guarded(pattern: &str, not_followed_by: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            not_followed_by: Some(not_followed_by.to_string()),
        }
    }

    fn compile(&self, name: &'static str) -> Result<Anchor> {
        Anchor::new(name, &self.pattern, self.not_followed_by.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub start: AnchorSpec,
    pub end: AnchorSpec,
}

/// All patterns one statement layout depends on. Missing fields in a
/// deserialized set fall back to the built-in layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternSet {
    /// First line of the printed statement period, e.g. `November 1 - November 30, 2023`.
    pub period: AnchorSpec,
    pub credits: SectionSpec,
    pub debits: SectionSpec,
    pub interest: SectionSpec,
}

impl Default for PatternSet {
    fn default() -> Self {
        let section = |start: &str, end: &str| SectionSpec {
            start: AnchorSpec::guarded(start, SECTION_TOTAL_GUARD),
            end: AnchorSpec::new(end),
        };

        Self {
            period: AnchorSpec::new(MONTH_GROUP),
            credits: section(CREDITS_START, CREDITS_END),
            debits: section(DEBITS_START, DEBITS_END),
            interest: section(INTEREST_START, INTEREST_END),
        }
    }
}

impl PatternSet {
    pub fn compile(&self) -> Result<StatementLayout> {
        Ok(StatementLayout {
            period: self.period.compile("period")?,
            credits: SectionAnchors {
                start: self.credits.start.compile("credits.start")?,
                end: self.credits.end.compile("credits.end")?,
            },
            debits: SectionAnchors {
                start: self.debits.start.compile("debits.start")?,
                end: self.debits.end.compile("debits.end")?,
            },
            interest: SectionAnchors {
                start: self.interest.start.compile("interest.start")?,
                end: self.interest.end.compile("interest.end")?,
            },
        })
    }
}

/// Header and footer anchors delimiting one section.
#[derive(Debug, Clone)]
pub struct SectionAnchors {
    pub start: Anchor,
    pub end: Anchor,
}

/// Compiled form of a [`PatternSet`].
#[derive(Debug, Clone)]
pub struct StatementLayout {
    pub period: Anchor,
    pub credits: SectionAnchors,
    pub debits: SectionAnchors,
    pub interest: SectionAnchors,
}

impl StatementLayout {
    pub fn section(&self, ty: TransactionType) -> &SectionAnchors {
        match ty {
            TransactionType::Credit => &self.credits,
            TransactionType::Debit => &self.debits,
            TransactionType::Interest => &self.interest,
        }
    }
}
