//! Recurrence engine
//!
//! Next-occurrence roll-forward, cycle progress, countdown boards and
//! weekly timetable dates.

#![warn(missing_docs)]

pub mod engine;
pub mod display;
pub mod board;
pub mod week;

pub use engine::RecurrenceEngine;
pub use display::{Locale, RemainingText};
pub use board::{Countdown, CountdownBoard};
pub use week::{date_for_weekday, week_strip, WeekOrder, WeekdaySlot};
