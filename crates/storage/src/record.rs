//! Normalization of loosely typed anniversary records.
//!
//! Records written by older clients or exported from the hosted table mix
//! `snake_case` column names with the app's own field names, encode the
//! avatar pair as a JSON string, and sometimes store `pinned` as `"true"`.
//! Everything is folded into [`Anniversary`] here so the rest of the
//! workspace only ever sees typed values.

use chrono::{DateTime, Utc};
use keepsake_core::{format_date, parse_date, Anniversary, AnniversaryId, Avatars, Period, Time};
use serde::Deserialize;
use serde_json::Value;

use crate::trait_::{Result, StorageError};

/// A record as found on disk or in an import file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnniversary {
    /// Id, as a string or number
    pub id: Option<Value>,
    /// Title
    pub title: Option<String>,
    /// Anchor date (column name)
    pub from_date: Option<String>,
    /// Anchor date (app field name)
    pub from: Option<String>,
    /// Target date (column name)
    pub target_date: Option<String>,
    /// Target date (app field name)
    pub target: Option<String>,
    /// Repeat (column name)
    pub repeat_type: Option<String>,
    /// Repeat (app field name)
    pub repeat: Option<String>,
    /// Pinned flag: bool, `"true"`/`"false"` or 0/1
    pub pinned: Option<Value>,
    /// Avatars: object or JSON-encoded string
    pub avatars: Option<Value>,
    /// Creation time
    pub created_at: Option<Value>,
    /// Update time
    pub updated_at: Option<Value>,
}

/// Turn a raw record into a typed one.
///
/// Fails only when the record has no usable id. Readable dates are rewritten
/// as `YYYY-MM-DD` so stored targets sort by date; unreadable ones are kept
/// as written and surface later as a zeroed countdown.
pub fn normalize(raw: RawAnniversary) -> Result<Anniversary> {
    let id = match raw.id {
        Some(Value::String(s)) if !s.trim().is_empty() => AnniversaryId::from(s.trim()),
        Some(Value::Number(n)) => AnniversaryId::from(n.to_string()),
        _ => return Err(StorageError::Invalid("record without id".to_string())),
    };

    let now = Utc::now();
    let created_at = raw.created_at.as_ref().and_then(timestamp).unwrap_or(now);
    let updated_at = raw.updated_at.as_ref().and_then(timestamp).unwrap_or(created_at);

    Ok(Anniversary {
        id,
        title: raw.title.unwrap_or_default(),
        from: canonical_date(first_non_empty(raw.from_date, raw.from)),
        target: canonical_date(first_non_empty(raw.target_date, raw.target)),
        avatars: raw.avatars.map(avatars).unwrap_or_default(),
        pinned: raw.pinned.as_ref().map(truthy).unwrap_or(false),
        repeat: Period::parse_lossy(&first_non_empty(raw.repeat_type, raw.repeat)),
        created_at,
        updated_at,
    })
}

/// Normalize a batch, skipping (and logging) records that cannot be used.
pub fn normalize_all(values: Vec<Value>) -> Vec<Anniversary> {
    values
        .into_iter()
        .filter_map(|value| {
            let raw: RawAnniversary = match serde_json::from_value(value) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed anniversary record");
                    return None;
                }
            };
            match normalize(raw) {
                Ok(a) => Some(a),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping anniversary record");
                    None
                }
            }
        })
        .collect()
}

fn first_non_empty(primary: Option<String>, secondary: Option<String>) -> String {
    primary
        .filter(|s| !s.trim().is_empty())
        .or(secondary)
        .unwrap_or_default()
}

fn canonical_date(s: String) -> String {
    match parse_date(&s) {
        Ok(date) => format_date(date),
        Err(_) => s,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64().map(|n| n != 0).unwrap_or(false),
        _ => false,
    }
}

fn avatars(value: Value) -> Avatars {
    let value = match value {
        Value::String(s) => match serde_json::from_str(&s) {
            Ok(v) => v,
            Err(_) => return Avatars::default(),
        },
        other => other,
    };
    serde_json::from_value(value).unwrap_or_default()
}

fn timestamp(value: &Value) -> Option<Time> {
    let s = value.as_str()?;
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
