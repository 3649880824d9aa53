//! JSON file storage implementation.
//!
//! Stores one pretty-printed JSON file per anniversary under
//! `<root>/anniversaries/` and keeps a small per-record meta marker
//! (version + updated_at) under `<root>/meta/anniversaries/`. Files are read
//! through [`crate::record`], so hand-edited or imported records in the
//! hosted table's column layout load as well as ones written here.

use std::path::{Path, PathBuf};

use keepsake_core::{Anniversary, AnniversaryId};
use tokio::fs;

use super::record::{normalize, RawAnniversary};
use super::{Result, Storage, StorageError};

const KIND: &str = "anniversaries";

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Create storage, making the data and meta directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join(KIND)).await?;
        fs::create_dir_all(root.join("meta").join(KIND)).await?;

        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, id: &AnniversaryId) -> Result<PathBuf> {
        Ok(self.root.join(KIND).join(format!("{}.json", file_stem(id)?)))
    }

    fn meta_path(&self, id: &AnniversaryId) -> Result<PathBuf> {
        Ok(self
            .root
            .join("meta")
            .join(KIND)
            .join(format!("{}.meta.json", file_stem(id)?)))
    }

    /// Current meta version of a record (0 when never written).
    pub async fn version(&self, id: &AnniversaryId) -> Result<u64> {
        match fs::read_to_string(self.meta_path(id)?).await {
            Ok(s) => Ok(serde_json::from_str::<serde_json::Value>(&s)
                .ok()
                .and_then(|json| json.get("version").and_then(|v| v.as_u64()))
                .unwrap_or(0)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Read and increment per-record version, return new version.
    async fn bump_version(&self, id: &AnniversaryId) -> Result<u64> {
        let version = self.version(id).await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        fs::write(self.meta_path(id)?, serde_json::to_string_pretty(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn list_anniversaries(&self) -> Result<Vec<Anniversary>> {
        let mut items = list_dir(&self.root.join(KIND)).await?;
        items.sort_by(|a, b| a.target.cmp(&b.target).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn load_anniversary(&self, id: &AnniversaryId) -> Result<Option<Anniversary>> {
        read_record(&self.record_path(id)?).await
    }

    async fn save_anniversary(&mut self, anniversary: &Anniversary) -> Result<()> {
        let path = self.record_path(&anniversary.id)?;
        let json = serde_json::to_string_pretty(anniversary)?;
        fs::write(&path, json.as_bytes()).await?;

        let version = self.bump_version(&anniversary.id).await?;
        tracing::debug!(id = %anniversary.id, version, "saved anniversary");
        Ok(())
    }

    async fn remove_anniversary(&mut self, id: &AnniversaryId) -> Result<()> {
        match fs::remove_file(self.record_path(id)?).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        // The meta marker is advisory; a missing one is fine.
        if let Err(e) = fs::remove_file(self.meta_path(id)?).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                return Err(e.into());
            }
        }
        tracing::debug!(id = %id, "removed anniversary");
        Ok(())
    }
}

/// Ids become file names, so anything that could escape the directory is
/// rejected.
fn file_stem(id: &AnniversaryId) -> Result<&str> {
    let s = id.as_str();
    if s.is_empty() || s.starts_with('.') || s.contains(|c: char| c == '/' || c == '\\') {
        return Err(StorageError::Invalid(format!("unusable id {s:?}")));
    }
    Ok(s)
}

async fn read_record(path: &Path) -> Result<Option<Anniversary>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let raw: RawAnniversary = serde_json::from_str(&json)?;
            Ok(Some(normalize(raw)?))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir(dir: &Path) -> Result<Vec<Anniversary>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_record(&entry.path()).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => tracing::warn!(path = %entry.path().display(), error = %e, "skipping unreadable record"),
        }
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_core::{AnniversaryInput, Avatars, Period};
    use tempfile::TempDir;

    async fn store() -> (TempDir, JsonStorage) {
        let dir = TempDir::new().unwrap();
        let storage = JsonStorage::new(dir.path()).await.unwrap();
        (dir, storage)
    }

    fn input(title: &str, target: &str) -> AnniversaryInput {
        AnniversaryInput {
            title: title.to_string(),
            target: target.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_and_lists_by_target() {
        let (_dir, mut storage) = store().await;

        storage.upsert_anniversary(input("Christmas", "2025-12-25")).await.unwrap();
        let list = storage
            .upsert_anniversary(AnniversaryInput {
                from: Some("2020-10-01".to_string()),
                repeat: Period::Yearly,
                pinned: true,
                ..input("National day", "2025/10/01")
            })
            .await
            .unwrap();

        let titles: Vec<_> = list.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["National day", "Christmas"]);
        assert_eq!(list[0].target, "2025-10-01");
        assert_eq!(list[0].from, "2020-10-01");
        assert!(list[0].pinned);
        assert_eq!(list[0].repeat, Period::Yearly);
        assert!(list[0].id.as_str().starts_with("anniv-"));
        assert_eq!(storage.version(&list[0].id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_anchor_created_at_and_avatars() {
        let (_dir, mut storage) = store().await;

        let list = storage
            .upsert_anniversary(AnniversaryInput {
                from: Some("2019-02-14".to_string()),
                avatars: Some(Avatars { left: "me.png".into(), right: "you.png".into() }),
                ..input("Valentine", "2025-02-14")
            })
            .await
            .unwrap();
        let original = list[0].clone();

        let list = storage
            .upsert_anniversary(AnniversaryInput {
                id: Some(original.id.clone()),
                repeat: Period::Yearly,
                ..input("Valentine's", "2026-02-14")
            })
            .await
            .unwrap();

        assert_eq!(list.len(), 1);
        let updated = &list[0];
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "Valentine's");
        assert_eq!(updated.from, "2019-02-14");
        assert_eq!(updated.target, "2026-02-14");
        assert_eq!(updated.avatars.left, "me.png");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at >= original.updated_at);
        assert_eq!(storage.version(&original.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_new_record_without_from_is_anchored_today() {
        let (_dir, mut storage) = store().await;
        let list = storage.upsert_anniversary(input("Trip", "2030-01-01")).await.unwrap();
        let today = keepsake_core::format_date(chrono::Local::now().date_naive());
        assert_eq!(list[0].from, today);
    }

    #[tokio::test]
    async fn test_upsert_rejects_bad_input() {
        let (_dir, mut storage) = store().await;
        assert!(matches!(
            storage.upsert_anniversary(input("  ", "2025-01-01")).await,
            Err(StorageError::Input(_))
        ));
        assert!(matches!(
            storage.upsert_anniversary(input("x", "tomorrow")).await,
            Err(StorageError::Input(_))
        ));
        assert!(storage.list_anniversaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, mut storage) = store().await;
        let list = storage.upsert_anniversary(input("a", "2025-01-01")).await.unwrap();
        let id = list[0].id.clone();

        let list = storage.delete_anniversary(&id).await.unwrap();
        assert!(list.is_empty());
        assert!(storage.load_anniversary(&id).await.unwrap().is_none());
        assert_eq!(storage.version(&id).await.unwrap(), 0);

        assert!(matches!(
            storage.delete_anniversary(&id).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_loose_records_on_disk_are_normalized() {
        let (dir, storage) = store().await;
        let raw = serde_json::json!({
            "id": "legacy-1",
            "title": "Imported",
            "from_date": "2020-01-01",
            "target_date": "2025-03-01",
            "repeat_type": "month",
            "pinned": "true",
            "avatars": "{\"left\":\"l\",\"right\":\"r\"}"
        });
        std::fs::write(
            dir.path().join(KIND).join("legacy-1.json"),
            serde_json::to_string(&raw).unwrap(),
        )
        .unwrap();
        std::fs::write(dir.path().join(KIND).join("broken.json"), "{ not json").unwrap();
        std::fs::write(dir.path().join(KIND).join("notes.txt"), "ignored").unwrap();

        let list = storage.list_anniversaries().await.unwrap();
        assert_eq!(list.len(), 1);
        let a = &list[0];
        assert_eq!(a.repeat, Period::Monthly);
        assert!(a.pinned);
        assert_eq!(a.avatars.left, "l");

        let loaded = storage
            .load_anniversary(&AnniversaryId::from("legacy-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.from, "2020-01-01");
    }

    #[tokio::test]
    async fn test_imported_dates_sort_by_date_whatever_the_separator() {
        let (_dir, mut storage) = store().await;
        let saved = storage
            .import_records(vec![
                serde_json::json!({ "id": "late", "target_date": "2025-12-25" }),
                serde_json::json!({ "id": "early", "target_date": "2025/03/01" }),
            ])
            .await;
        assert_eq!(saved, 2);

        let list = storage.list_anniversaries().await.unwrap();
        let ids: Vec<_> = list.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert_eq!(list[0].target, "2025-03-01");
    }

    #[tokio::test]
    async fn test_import_skips_unsaveable_ids_and_keeps_going() {
        let (_dir, mut storage) = store().await;
        let saved = storage
            .import_records(vec![
                serde_json::json!({ "id": "a", "target": "2025-01-01" }),
                serde_json::json!({ "id": "x/y", "target": "2025-02-01" }),
                serde_json::json!({ "id": ".hidden", "target": "2025-03-01" }),
                serde_json::json!({ "title": "no id" }),
                serde_json::json!({ "id": "b", "target": "2025-04-01" }),
            ])
            .await;
        assert_eq!(saved, 2);

        let ids: Vec<_> = storage
            .list_anniversaries()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_path_like_ids_are_rejected() {
        let (_dir, storage) = store().await;
        assert!(matches!(
            storage.load_anniversary(&AnniversaryId::from("../etc/passwd")).await,
            Err(StorageError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_list_or_falls_back_when_store_is_gone() {
        let (dir, storage) = store().await;
        std::fs::remove_dir_all(dir.path().join(KIND)).unwrap();

        let now = chrono::Utc::now();
        let fallback = vec![Anniversary {
            id: AnniversaryId::from("cached"),
            title: "cached".to_string(),
            from: String::new(),
            target: "2025-01-01".to_string(),
            avatars: Avatars::default(),
            pinned: false,
            repeat: Period::None,
            created_at: now,
            updated_at: now,
        }];
        let list = storage.list_or(fallback.clone()).await;
        assert_eq!(list, fallback);
    }
}
