//! Recurrence rule model.

use serde::{Deserialize, Serialize};

use crate::date::{parse_date, ParseError};
use crate::Date;

/// How often an anniversary repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Happens once
    #[default]
    None,
    /// Every calendar year
    #[serde(rename = "year")]
    Yearly,
    /// Every calendar month
    #[serde(rename = "month")]
    Monthly,
    /// Every day
    #[serde(rename = "day")]
    Daily,
}

impl Period {
    /// Parse a stored repeat value. Anything unrecognised is `None`.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" => Period::Yearly,
            "month" | "monthly" => Period::Monthly,
            "day" | "daily" => Period::Daily,
            _ => Period::None,
        }
    }

    /// Get the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::None => "none",
            Period::Yearly => "year",
            Period::Monthly => "month",
            Period::Daily => "day",
        }
    }

    /// Whether occurrences roll forward.
    pub fn repeats(&self) -> bool {
        !matches!(self, Period::None)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring (or one-off) date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// Original/first occurrence
    pub anchor: Date,

    /// Most recently configured occurrence; roll-forward starts here
    pub target: Date,

    /// Repeat period
    pub period: Period,
}

impl RecurrenceRule {
    /// Create a rule from typed dates.
    pub fn new(anchor: Date, target: Date, period: Period) -> Self {
        Self { anchor, target, period }
    }

    /// Create a rule from stored date strings.
    pub fn parse(anchor: &str, target: &str, period: Period) -> Result<Self, ParseError> {
        Ok(Self {
            anchor: parse_date(anchor)?,
            target: parse_date(target)?,
            period,
        })
    }
}
