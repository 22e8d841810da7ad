use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{validate_name, BlobStore, StorageError};

/// Filesystem-backed blob store.
///
/// Each blob is one file directly under `base_path`, which is also the
/// directory served read-only by the router.
pub struct FilesystemBlobStore {
    base_path: PathBuf,
    max_size: u64,
}

impl FilesystemBlobStore {
    /// Create a new filesystem blob store, creating `base_path` if needed.
    pub async fn new(base_path: PathBuf, max_size: u64) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        validate_name(name)?;
        Ok(self.base_path.join(name))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let blob_path = self.blob_path(name)?;

        if data.len() as u64 > self.max_size {
            return Err(StorageError::SizeLimitExceeded {
                actual: data.len() as u64,
                limit: self.max_size,
            });
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &blob_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(blob = name, bytes = data.len(), "Stored blob");
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let blob_path = self.blob_path(name)?;
        Ok(fs::try_exists(&blob_path).await?)
    }

    async fn delete(&self, name: &str) -> Result<bool, StorageError> {
        let blob_path = self.blob_path(name)?;
        match fs::remove_file(&blob_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
