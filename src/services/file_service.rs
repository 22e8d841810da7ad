//! File service - Image uploads into the blob store.

use async_trait::async_trait;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::ALLOWED_IMAGE_EXTENSIONS;
use crate::errors::{AppError, AppResult};
use crate::infra::{BlobStore, StorageError};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Location of a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UploadedFile {
    #[schema(example = "http://localhost:3000/images/0d5c5c1e-7a54-4f7b-9a0e-1c4a4f0b8f55.png")]
    pub uri: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait FileService: Send + Sync {
    /// Store an image under a fresh name
    async fn upload(&self, file_name: String, data: Vec<u8>) -> AppResult<UploadedFile>;

    /// Delete a blob by name or by `{container}/{name}` path
    async fn delete(&self, file_name: String) -> AppResult<()>;
}

pub struct FileManager {
    store: Arc<dyn BlobStore>,
    container: String,
    public_base_url: String,
}

impl FileManager {
    pub fn new(store: Arc<dyn BlobStore>, container: String, public_base_url: String) -> Self {
        Self {
            store,
            container,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn blob_name<'a>(&self, file_name: &'a str) -> &'a str {
        let prefix = format!("{}/", self.container);
        match file_name.find(&prefix) {
            Some(at) => &file_name[at + prefix.len()..],
            None => file_name,
        }
    }
}

/// Lowercased extension if it is an accepted image type
fn image_extension(file_name: &str) -> Option<String> {
    let extension = Path::new(file_name).extension()?.to_str()?.to_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then_some(extension)
}

#[async_trait]
impl FileService for FileManager {
    async fn upload(&self, file_name: String, data: Vec<u8>) -> AppResult<UploadedFile> {
        let extension = image_extension(&file_name).ok_or(AppError::InvalidImageFormat)?;
        let blob = format!("{}.{}", Uuid::new_v4(), extension);

        self.store.put(&blob, &data).await?;
        tracing::info!(blob = %blob, size = data.len(), "Uploaded file");

        Ok(UploadedFile {
            uri: format!("{}/{}/{}", self.public_base_url, self.container, blob),
        })
    }

    async fn delete(&self, file_name: String) -> AppResult<()> {
        let blob = self.blob_name(&file_name);
        match self.store.delete(blob).await {
            Ok(true) => {
                tracing::info!(blob = %blob, "Deleted file");
                Ok(())
            }
            Ok(false) | Err(StorageError::InvalidName(_)) => {
                Err(AppError::BlobNotFound(blob.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
