//! Keepsake core data models.
//!
//! This crate defines the recurrence rules, anniversary records and derived
//! countdown state shared by the engine, the store and the CLI.

#![warn(missing_docs)]

// Identities
mod id;

// Dates and rules
mod date;
mod rule;

// Persisted records
mod anniversary;

// Derived state
mod state;

// Re-exports
pub use id::AnniversaryId;
pub use date::{parse_date, format_date, ParseError};
pub use rule::{Period, RecurrenceRule};
pub use anniversary::{Anniversary, AnniversaryInput, Avatars, InputError};
pub use state::{OccurrenceState, RemainingSpan};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Calendar date type (no time of day)
pub type Date = chrono::NaiveDate;
