use crate::digest;
use crate::keys::{blob_filename, generate_clip_id, is_valid_extension};
use crate::traits::{BlobStore, BlobStream, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use futures::StreamExt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// How many fresh ids to try when a generated blob name already exists.
const MAX_ID_ATTEMPTS: usize = 5;

/// Local filesystem blob store: one flat file per clip inside `base_path`.
#[derive(Clone, Debug)]
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    /// Create a new LocalBlobStore, creating the directory if needed.
    ///
    /// # Arguments
    /// * `base_path` - Directory holding the blobs (e.g., "uploads")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalBlobStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve a blob filename to its path, rejecting anything that is not a flat name.
    fn blob_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a valid blob name",
                filename
            )));
        }
        Ok(self.base_path.join(filename))
    }

    /// Create a new, empty blob under a generated id that is not already taken.
    async fn create_blob(&self, extension: &str) -> StorageResult<(String, String, PathBuf, fs::File)> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let clip_id = generate_clip_id();
            let filename = blob_filename(&clip_id, extension);
            let path = self.blob_path(&filename)?;

            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((clip_id, filename, path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::warn!(clip_id = %clip_id, "Generated clip id collides with an existing blob, regenerating");
                }
                Err(e) => {
                    return Err(StorageError::UploadFailed(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(StorageError::UploadFailed(format!(
            "Could not allocate a unique clip id after {} attempts",
            MAX_ID_ATTEMPTS
        )))
    }

    /// Copy at most `max_size` bytes into `file`; one byte more means the upload is too large.
    async fn write_limited(
        file: &mut fs::File,
        path: &Path,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        max_size: u64,
    ) -> StorageResult<u64> {
        let mut limited = reader.take(max_size.saturating_add(1));

        let bytes_copied = tokio::io::copy(&mut limited, file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        if bytes_copied > max_size {
            return Err(StorageError::TooLarge { max: max_size });
        }

        file.flush().await?;
        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(bytes_copied)
    }

    /// Best-effort removal of a partially written blob.
    async fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial blob");
            }
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        extension: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        max_size: u64,
    ) -> StorageResult<StoredBlob> {
        if !is_valid_extension(extension) {
            return Err(StorageError::InvalidKey(format!(
                "'{}' is not a valid extension",
                extension
            )));
        }

        let start = std::time::Instant::now();
        let (clip_id, filename, path, mut file) = self.create_blob(extension).await?;

        let size = match Self::write_limited(&mut file, &path, reader, max_size).await {
            Ok(size) => size,
            Err(e) => {
                drop(file);
                Self::discard(&path).await;
                return Err(e);
            }
        };
        drop(file);

        let hash = match digest::file_hash(&path).await {
            Ok(hash) => hash,
            Err(e) => {
                Self::discard(&path).await;
                return Err(StorageError::UploadFailed(format!(
                    "Failed to hash file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        tracing::info!(
            path = %path.display(),
            clip_id = %clip_id,
            size_bytes = size,
            file_hash = %hash,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob stream upload successful"
        );

        Ok(StoredBlob {
            clip_id,
            filename,
            size,
            hash,
        })
    }

    async fn open(&self, filename: &str) -> StorageResult<BlobStream> {
        let path = self.blob_path(filename)?;

        let file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(filename.to_string()))
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to open file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let size = file
            .metadata()
            .await
            .map_err(|e| StorageError::DownloadFailed(format!("Failed to stat {}: {}", path.display(), e)))?
            .len();

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Local blob stream read error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        tracing::debug!(path = %path.display(), size_bytes = size, "Opened local blob for streaming");

        Ok(BlobStream {
            size,
            stream: Box::pin(stream),
        })
    }

    async fn delete(&self, filename: &str) -> StorageResult<()> {
        let path = self.blob_path(filename)?;
        let start = std::time::Instant::now();

        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Blob already absent, nothing to delete");
                return Ok(());
            }
            Err(e) => {
                return Err(StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                )))
            }
        }

        tracing::info!(
            path = %path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local blob delete successful"
        );

        Ok(())
    }

    async fn exists(&self, filename: &str) -> StorageResult<bool> {
        let path = self.blob_path(filename)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn health_check(&self) -> StorageResult<()> {
        let meta = fs::metadata(&self.base_path).await?;
        if !meta.is_dir() {
            return Err(StorageError::ConfigError(format!(
                "{} is not a directory",
                self.base_path.display()
            )));
        }
        if meta.permissions().readonly() {
            return Err(StorageError::ConfigError(format!(
                "{} is read-only",
                self.base_path.display()
            )));
        }
        Ok(())
    }
}
