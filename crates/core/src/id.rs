//! Identifiers for Keepsake records.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an Anniversary.
///
/// Ids are opaque strings: records imported from older stores keep whatever
/// id they arrived with, while new records get `anniv-<ULID>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnniversaryId(String);

impl AnniversaryId {
    /// Generate a new AnniversaryId
    pub fn new() -> Self {
        Self(format!("anniv-{}", Ulid::new()))
    }

    /// Borrow the raw id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AnniversaryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AnniversaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for AnniversaryId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for AnniversaryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AnniversaryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
