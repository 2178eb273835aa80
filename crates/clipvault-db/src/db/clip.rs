use clipvault_core::{AppError, ClipRecord, MetadataDocument};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Clip metadata repository
///
/// Every operation reads the whole JSON document from disk; every mutation rewrites
/// it whole. Mutations run load-mutate-save under one process-wide gate so
/// overlapping writers in this process cannot lose each other's updates. Separate
/// processes sharing the file are not coordinated: the last rename wins.
#[derive(Clone, Debug)]
pub struct ClipRepository {
    path: Arc<PathBuf>,
    write_gate: Arc<Mutex<()>>,
}

impl ClipRepository {
    /// Open the metadata document at `path`, initializing it to `{"clips": []}` if absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Metadata(format!(
                    "Failed to create metadata directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let repository = Self {
            path: Arc::new(path),
            write_gate: Arc::new(Mutex::new(())),
        };

        if !fs::try_exists(repository.path()).await.unwrap_or(false) {
            repository
                .write_document(&MetadataDocument::default())
                .await?;
            tracing::info!(path = %repository.path().display(), "Initialized empty metadata document");
        }

        Ok(repository)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document from disk.
    ///
    /// Any read or parse failure yields an empty document. Callers never see the
    /// failure; it is only logged. A corrupted file therefore hides every clip from
    /// the service even though their blobs remain on disk.
    pub async fn load(&self) -> MetadataDocument {
        let raw = match fs::read(self.path()).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() == ErrorKind::NotFound {
                    tracing::debug!(path = %self.path().display(), "Metadata document missing, treating as empty");
                } else {
                    tracing::warn!(path = %self.path().display(), error = %e, "Failed to read metadata document, treating as empty");
                }
                return MetadataDocument::default();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    path = %self.path().display(),
                    error = %e,
                    "Metadata document is not valid JSON, treating as empty"
                );
                MetadataDocument::default()
            }
        }
    }

    /// Replace the document on disk with `doc`.
    pub async fn save(&self, doc: &MetadataDocument) -> Result<(), AppError> {
        let _guard = self.write_gate.lock().await;
        self.write_document(doc).await
    }

    /// Full document, records in upload order.
    pub async fn list(&self) -> MetadataDocument {
        self.load().await
    }

    /// First record with the given id.
    pub async fn find(&self, clip_id: &str) -> Option<ClipRecord> {
        self.load().await.find(clip_id).cloned()
    }

    /// Append a record. Fails with [`AppError::Conflict`] if its id is already present.
    pub async fn insert(&self, record: ClipRecord) -> Result<(), AppError> {
        let _guard = self.write_gate.lock().await;

        let mut doc = self.load().await;
        if doc.contains(&record.clip_id) {
            return Err(AppError::Conflict(format!(
                "Clip id {} is already in use",
                record.clip_id
            )));
        }

        let clip_id = record.clip_id.clone();
        doc.push(record);
        self.write_document(&doc).await?;

        tracing::debug!(clip_id = %clip_id, clip_count = doc.len(), "Clip record inserted");
        Ok(())
    }

    /// Remove the record with the given id, returning it if it existed.
    pub async fn remove(&self, clip_id: &str) -> Result<Option<ClipRecord>, AppError> {
        let _guard = self.write_gate.lock().await;

        let mut doc = self.load().await;
        let removed = doc.remove(clip_id);
        if removed.is_some() {
            self.write_document(&doc).await?;
            tracing::debug!(clip_id = %clip_id, clip_count = doc.len(), "Clip record removed");
        }

        Ok(removed)
    }

    /// Unlike [`load`](Self::load), reports an unreadable or corrupt document.
    pub async fn health_check(&self) -> Result<(), AppError> {
        let raw = fs::read(self.path()).await.map_err(|e| {
            AppError::Metadata(format!("Failed to read {}: {}", self.path().display(), e))
        })?;
        serde_json::from_slice::<MetadataDocument>(&raw)?;
        Ok(())
    }

    /// Serialize pretty-printed to a sibling temp file, then rename it over the target.
    /// The temp file is removed again if any step fails.
    async fn write_document(&self, doc: &MetadataDocument) -> Result<(), AppError> {
        let body = serde_json::to_vec_pretty(doc)?;
        let temp_path = self.temp_path();

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            AppError::Metadata(format!("Failed to create {}: {}", temp_path.display(), e))
        })?;

        let written = async {
            file.write_all(&body).await.map_err(|e| {
                AppError::Metadata(format!("Failed to write {}: {}", temp_path.display(), e))
            })?;
            file.sync_all().await.map_err(|e| {
                AppError::Metadata(format!("Failed to sync {}: {}", temp_path.display(), e))
            })
        }
        .await;
        drop(file);

        let result = match written {
            Ok(()) => fs::rename(&temp_path, self.path()).await.map_err(|e| {
                AppError::Metadata(format!(
                    "rename {} to {}: {}",
                    temp_path.display(),
                    self.path().display(),
                    e
                ))
            }),
            Err(e) => Err(e),
        };

        if result.is_err() {
            discard_temp(&temp_path).await;
        }
        result
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path()
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "clips_metadata.json".into());
        name.push(".tmp");
        self.path().with_file_name(name)
    }
}

async fn discard_temp(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove metadata temp file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn record(id: &str) -> ClipRecord {
        ClipRecord {
            clip_id: id.to_string(),
            filename: format!("{}.mp4", id),
            original_filename: "capture.mp4".to_string(),
            upload_time: Utc::now(),
            file_size: 42,
            file_hash: "0011223344556677".to_string(),
            url: format!("http://localhost:5000/clips/{}", id),
        }
    }

    #[tokio::test]
    async fn test_open_initializes_empty_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("clips_metadata.json");

        let repo = ClipRepository::open(&path).await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, serde_json::json!({ "clips": [] }));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_open_keeps_existing_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clips_metadata.json");

        let repo = ClipRepository::open(&path).await.unwrap();
        repo.insert(record("aaaa1111")).await.unwrap();

        let reopened = ClipRepository::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupted_document_loads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clips_metadata.json");
        let repo = ClipRepository::open(&path).await.unwrap();

        fs::write(&path, b"{ not json").await.unwrap();

        assert!(repo.load().await.is_empty());
        assert!(repo.find("aaaa1111").await.is_none());
        assert!(repo.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_insert_remove_round_trip_is_durable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clips_metadata.json");
        let repo = ClipRepository::open(&path).await.unwrap();

        repo.insert(record("aaaa1111")).await.unwrap();
        repo.insert(record("bbbb2222")).await.unwrap();
        repo.insert(record("cccc3333")).await.unwrap();
        let removed = repo.remove("bbbb2222").await.unwrap();
        assert_eq!(removed.map(|r| r.clip_id), Some("bbbb2222".to_string()));

        let on_disk = ClipRepository::open(&path).await.unwrap().load().await;
        let ids: Vec<_> = on_disk.clips.iter().map(|c| c.clip_id.as_str()).collect();
        assert_eq!(ids, vec!["aaaa1111", "cccc3333"]);
        assert_eq!(on_disk, repo.load().await);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_none() {
        let dir = tempdir().unwrap();
        let repo = ClipRepository::open(dir.path().join("m.json")).await.unwrap();
        assert!(repo.remove("ffffffff").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let dir = tempdir().unwrap();
        let repo = ClipRepository::open(dir.path().join("m.json")).await.unwrap();

        repo.insert(record("aaaa1111")).await.unwrap();
        let result = repo.insert(record("aaaa1111")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_document_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.json");
        let repo = ClipRepository::open(&path).await.unwrap();
        repo.insert(record("aaaa1111")).await.unwrap();

        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\n  \"clips\": ["));
        assert!(!fs::try_exists(repo.temp_path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_save_replaces_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.json");
        let repo = ClipRepository::open(&path).await.unwrap();
        repo.insert(record("aaaa1111")).await.unwrap();

        let doc = MetadataDocument {
            clips: vec![record("bbbb2222"), record("cccc3333")],
        };
        repo.save(&doc).await.unwrap();

        assert_eq!(repo.load().await, doc);
        let raw = fs::read_to_string(&path).await.unwrap();
        assert!(raw.contains("\n  \"clips\": ["));
        assert!(!fs::try_exists(repo.temp_path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.json");
        let repo = ClipRepository::open(&path).await.unwrap();

        // A directory at the target makes the final rename fail.
        fs::remove_file(&path).await.unwrap();
        fs::create_dir(&path).await.unwrap();

        let result = repo.save(&MetadataDocument::default()).await;
        assert!(matches!(result, Err(AppError::Metadata(_))));
        assert!(!fs::try_exists(repo.temp_path()).await.unwrap());
    }

    /// Overlapping writers in one process all land: the write gate serializes them.
    #[tokio::test]
    async fn test_concurrent_inserts_are_not_lost() {
        let dir = tempdir().unwrap();
        let repo = ClipRepository::open(dir.path().join("m.json")).await.unwrap();

        let inserts = (0..16).map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.insert(record(&format!("{:08x}", i))).await })
        });
        for result in futures::future::join_all(inserts).await {
            result.unwrap().unwrap();
        }

        assert_eq!(repo.list().await.len(), 16);
    }
}
