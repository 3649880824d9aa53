//! Countdown boards for the home page and the anniversary list.
//!
//! Both views take the freshly loaded record list as an argument; nothing
//! here keeps a copy between calls.

use keepsake_core::{Anniversary, Date, OccurrenceState};
use serde::Serialize;

use crate::display::{Locale, RemainingText};
use crate::engine::RecurrenceEngine;

/// An anniversary together with its countdown.
#[derive(Debug, Clone, Serialize)]
pub struct Countdown {
    /// The stored record
    pub anniversary: Anniversary,

    /// Derived state
    pub state: OccurrenceState,

    /// Rendered remaining time
    pub remaining_text: String,
}

/// Builds countdown views over a list of anniversaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountdownBoard {
    engine: RecurrenceEngine,
    locale: Locale,
}

impl CountdownBoard {
    /// Create a board rendering text in `locale`.
    pub fn new(locale: Locale) -> Self {
        Self {
            engine: RecurrenceEngine::new(),
            locale,
        }
    }

    /// Countdown for a single record. Unreadable dates give a zeroed state
    /// and empty text.
    pub fn countdown(&self, anniversary: &Anniversary, now: Date) -> Countdown {
        let state = self.engine.state_or_default(anniversary, now);
        let remaining_text = if state.is_zeroed() {
            String::new()
        } else {
            RemainingText::new(state.remaining, self.locale).to_string()
        };

        Countdown {
            anniversary: anniversary.clone(),
            state,
            remaining_text,
        }
    }

    /// The home-page countdown: the first pinned record, else the first one.
    pub fn featured(&self, list: &[Anniversary], now: Date) -> Option<Countdown> {
        let pick = list.iter().find(|a| a.pinned).or_else(|| list.first())?;
        Some(self.countdown(pick, now))
    }

    /// One countdown per record, in list order.
    pub fn cards(&self, list: &[Anniversary], now: Date) -> Vec<Countdown> {
        list.iter().map(|a| self.countdown(a, now)).collect()
    }
}
