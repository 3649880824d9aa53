//! Anniversary model - the persisted countdown record.

use serde::{Deserialize, Serialize};

use crate::date::{parse_date, ParseError};
use crate::id::AnniversaryId;
use crate::rule::{Period, RecurrenceRule};
use crate::Time;

/// An anniversary as stored and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anniversary {
    /// Unique identifier
    pub id: AnniversaryId,

    /// Event name
    pub title: String,

    /// Anchor date (`YYYY-MM-DD`)
    pub from: String,

    /// Target date (`YYYY-MM-DD`)
    pub target: String,

    /// Pictures shown on either side of the countdown
    pub avatars: Avatars,

    /// Shown on the home page in preference to the others
    pub pinned: bool,

    /// Repeat period
    pub repeat: Period,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Anniversary {
    /// Parse the stored dates into a recurrence rule.
    pub fn rule(&self) -> Result<RecurrenceRule, ParseError> {
        RecurrenceRule::parse(&self.from, &self.target, self.repeat)
    }
}

/// Avatar pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatars {
    /// Left avatar path or URL
    pub left: String,
    /// Right avatar path or URL
    pub right: String,
}

impl Default for Avatars {
    fn default() -> Self {
        Self {
            left: "assets/avatar-a.png".to_string(),
            right: "assets/avatar-b.png".to_string(),
        }
    }
}

/// Create/update payload for an anniversary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnniversaryInput {
    /// Existing id to update; a new id is generated when absent
    pub id: Option<AnniversaryId>,

    /// Event name
    pub title: String,

    /// Anchor date; kept from the stored record (or today) when absent
    pub from: Option<String>,

    /// Target date
    pub target: String,

    /// Pinned flag
    pub pinned: bool,

    /// Repeat period
    pub repeat: Period,

    /// Avatars; defaults when absent
    pub avatars: Option<Avatars>,
}

/// Rejected create/update payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// Title empty after trimming
    #[error("title is required")]
    MissingTitle,

    /// Target or anchor date unparsable
    #[error("{field}: {source}")]
    BadDate {
        /// Which field failed
        field: &'static str,
        /// Parse failure
        source: ParseError,
    },
}

impl AnniversaryInput {
    /// Check the payload and return it with the title trimmed.
    pub fn validated(mut self) -> Result<Self, InputError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(InputError::MissingTitle);
        }
        self.title = title.to_string();

        parse_date(&self.target).map_err(|source| InputError::BadDate { field: "target", source })?;
        if let Some(from) = &self.from {
            parse_date(from).map_err(|source| InputError::BadDate { field: "from", source })?;
        }
        Ok(self)
    }
}
