//! Occurrence roll-forward and cycle progress.
//!
//! All arithmetic is on calendar dates. Month and year steps clamp to the
//! last day of the resulting month (Jan 31 + 1 month = Feb 28/29), and the
//! k-th occurrence is always computed from the rule's target rather than
//! from the previous occurrence, so a series anchored on the 31st comes back
//! to the 31st whenever the month allows it.

use chrono::{Days, Months};
use keepsake_core::{
    Anniversary, Date, OccurrenceState, ParseError, Period, RecurrenceRule, RemainingSpan,
};

/// Computes next occurrences and countdown state for recurrence rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecurrenceEngine;

impl RecurrenceEngine {
    /// Create an engine.
    pub fn new() -> Self {
        Self
    }

    /// The first occurrence on or after `now`.
    ///
    /// One-off rules return their target unchanged, even when it has passed.
    pub fn next_occurrence(&self, rule: &RecurrenceRule, now: Date) -> Date {
        if !rule.period.repeats() {
            return rule.target;
        }

        let mut next = rule.target;
        let mut step: u32 = 0;
        while next < now {
            step += 1;
            match shift_forward(rule.target, rule.period, step) {
                Some(d) => next = d,
                None => {
                    tracing::warn!(target_date = %rule.target, period = %rule.period, "occurrence out of calendar range");
                    break;
                }
            }
        }
        next
    }

    /// Start of the cycle that ends at `next_occurrence`.
    ///
    /// One period back for repeating rules; the anchor for one-off rules.
    pub fn cycle_start(&self, rule: &RecurrenceRule, next_occurrence: Date) -> Date {
        let start = match rule.period {
            Period::None => return rule.anchor,
            Period::Yearly => next_occurrence.checked_sub_months(Months::new(12)),
            Period::Monthly => next_occurrence.checked_sub_months(Months::new(1)),
            Period::Daily => next_occurrence.checked_sub_days(Days::new(1)),
        };
        start.unwrap_or(next_occurrence)
    }

    /// Full countdown state for `rule` as seen on `now`.
    pub fn compute_state(&self, rule: &RecurrenceRule, now: Date) -> OccurrenceState {
        let occ = self.next_occurrence(rule, now);
        let start = self.cycle_start(rule, occ);

        let days_total = (occ - start).num_days().max(1);
        let days_until = (occ - now).num_days().max(0);
        let days_remaining = days_until.min(days_total);
        let days_elapsed = (days_total - days_remaining).clamp(0, days_total);
        let progress_percent = percent(days_elapsed, days_total);

        tracing::debug!(
            next = %occ,
            cycle_start = %start,
            days_total,
            days_until,
            progress_percent,
            "computed occurrence state"
        );

        OccurrenceState {
            next_occurrence: Some(occ),
            cycle_start: Some(start),
            days_until,
            days_total,
            days_elapsed,
            days_remaining,
            progress_percent,
            remaining: RemainingSpan::from_days(days_until),
        }
    }

    /// Countdown state from stored date strings.
    pub fn compute_state_from_strings(
        &self,
        anchor: &str,
        target: &str,
        period: Period,
        now: Date,
    ) -> Result<OccurrenceState, ParseError> {
        let rule = RecurrenceRule::parse(anchor, target, period)?;
        Ok(self.compute_state(&rule, now))
    }

    /// Countdown state for a stored anniversary, zeroed when its dates are
    /// unreadable.
    pub fn state_or_default(&self, anniversary: &Anniversary, now: Date) -> OccurrenceState {
        match anniversary.rule() {
            Ok(rule) => self.compute_state(&rule, now),
            Err(e) => {
                tracing::warn!(id = %anniversary.id, error = %e, "unreadable anniversary dates");
                OccurrenceState::zeroed()
            }
        }
    }
}

/// `date` moved forward by `steps` periods.
fn shift_forward(date: Date, period: Period, steps: u32) -> Option<Date> {
    match period {
        Period::None => Some(date),
        Period::Yearly => date.checked_add_months(Months::new(steps.checked_mul(12)?)),
        Period::Monthly => date.checked_add_months(Months::new(steps)),
        Period::Daily => date.checked_add_days(Days::new(u64::from(steps))),
    }
}

/// `round(100 * part / whole)` clamped to 0-100, rounding halves up.
fn percent(part: i64, whole: i64) -> u8 {
    let whole = whole.max(1);
    let p = (200 * part + whole) / (2 * whole);
    p.clamp(0, 100) as u8
}
