//! Derived countdown state. Computed on every display, never stored.

use serde::{Deserialize, Serialize};

use crate::Date;

/// Where "now" sits within the cycle leading up to the next occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceState {
    /// Next occurrence on or after now (unchanged target for one-off events)
    pub next_occurrence: Option<Date>,

    /// Start of the cycle ending at `next_occurrence`
    pub cycle_start: Option<Date>,

    /// Days until the next occurrence (the displayed countdown)
    pub days_until: i64,

    /// Cycle length in days
    pub days_total: i64,

    /// Days since cycle start
    pub days_elapsed: i64,

    /// Days left in the cycle; `days_until` capped at `days_total`
    pub days_remaining: i64,

    /// Elapsed share of the cycle (0-100)
    pub progress_percent: u8,

    /// Approximate breakdown of `days_until`
    pub remaining: RemainingSpan,
}

impl OccurrenceState {
    /// The state shown when a record cannot be evaluated.
    pub fn zeroed() -> Self {
        Self {
            next_occurrence: None,
            cycle_start: None,
            days_until: 0,
            days_total: 0,
            days_elapsed: 0,
            days_remaining: 0,
            progress_percent: 0,
            remaining: RemainingSpan::default(),
        }
    }

    /// Whether this is the fallback state.
    pub fn is_zeroed(&self) -> bool {
        self.next_occurrence.is_none()
    }
}

impl Default for OccurrenceState {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Days remaining split into years, months and days.
///
/// Uses fixed 365-day years and 30-day months. This is a display
/// approximation and does not follow the real calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingSpan {
    /// Whole 365-day years
    pub years: i64,
    /// Whole 30-day months
    pub months: i64,
    /// Leftover days; always 0 when `years > 0`
    pub days: i64,
}

impl RemainingSpan {
    /// Break a day count down.
    pub fn from_days(days: i64) -> Self {
        let days = days.max(0);
        if days >= 365 {
            Self {
                years: days / 365,
                months: (days % 365) / 30,
                days: 0,
            }
        } else {
            Self {
                years: 0,
                months: days / 30,
                days: days % 30,
            }
        }
    }
}
