//! Storage trait abstraction.

use async_trait::async_trait;
use chrono::{Local, Utc};
use keepsake_core::{
    format_date, parse_date, Anniversary, AnniversaryId, AnniversaryInput, InputError,
};

use crate::record::normalize_all;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected create/update payload
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Stored record that cannot be used
    #[error("Invalid record: {0}")]
    Invalid(String),
}

/// Storage abstraction for anniversaries.
///
/// Backends implement the four record operations; upsert, delete and
/// fallback loading are built on top of them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// All records, ordered by target date then id.
    async fn list_anniversaries(&self) -> Result<Vec<Anniversary>>;

    /// Load a record by id.
    async fn load_anniversary(&self, id: &AnniversaryId) -> Result<Option<Anniversary>>;

    /// Write a record (create or replace).
    async fn save_anniversary(&mut self, anniversary: &Anniversary) -> Result<()>;

    /// Remove a record. Missing ids are `NotFound`.
    async fn remove_anniversary(&mut self, id: &AnniversaryId) -> Result<()>;

    /// Insert or update from a form payload and return the refreshed list.
    ///
    /// Updates keep `created_at` and, when the payload has no `from`, the
    /// stored anchor. New records without `from` are anchored today.
    async fn upsert_anniversary(&mut self, input: AnniversaryInput) -> Result<Vec<Anniversary>> {
        let input = input.validated()?;
        let now = Utc::now();

        let existing = match &input.id {
            Some(id) => self.load_anniversary(id).await?,
            None => None,
        };

        let from = match (&input.from, &existing) {
            (Some(from), _) => canonical(from)?,
            (None, Some(prev)) if !prev.from.is_empty() => prev.from.clone(),
            _ => format_date(Local::now().date_naive()),
        };

        let anniversary = Anniversary {
            id: input.id.clone().unwrap_or_default(),
            title: input.title,
            from,
            target: canonical(&input.target)?,
            avatars: input
                .avatars
                .or_else(|| existing.as_ref().map(|prev| prev.avatars.clone()))
                .unwrap_or_default(),
            pinned: input.pinned,
            repeat: input.repeat,
            created_at: existing.as_ref().map(|prev| prev.created_at).unwrap_or(now),
            updated_at: now,
        };

        tracing::debug!(id = %anniversary.id, update = existing.is_some(), "upserting anniversary");
        self.save_anniversary(&anniversary).await?;
        self.list_anniversaries().await
    }

    /// Delete a record and return the refreshed list.
    async fn delete_anniversary(&mut self, id: &AnniversaryId) -> Result<Vec<Anniversary>> {
        self.remove_anniversary(id).await?;
        self.list_anniversaries().await
    }

    /// Save a batch of exported records and return how many were written.
    ///
    /// Records that fail normalization or cannot be saved are logged and
    /// skipped; the rest of the batch is still written.
    async fn import_records(&mut self, values: Vec<serde_json::Value>) -> usize {
        let mut saved = 0;
        for record in normalize_all(values) {
            match self.save_anniversary(&record).await {
                Ok(()) => saved += 1,
                Err(e) => tracing::warn!(id = %record.id, error = %e, "skipping imported record"),
            }
        }
        saved
    }

    /// All records, or `fallback` when the store cannot be read.
    async fn list_or(&self, fallback: Vec<Anniversary>) -> Vec<Anniversary> {
        match self.list_anniversaries().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, fallback = fallback.len(), "listing anniversaries failed, using fallback");
                fallback
            }
        }
    }
}

/// Rewrite an accepted date string as `YYYY-MM-DD`.
fn canonical(date: &str) -> Result<String> {
    parse_date(date)
        .map(format_date)
        .map_err(|e| StorageError::Invalid(e.to_string()))
}
