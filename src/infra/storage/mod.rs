//! Blob storage for uploaded recipe and profile pictures.
//!
//! Blobs are addressed by a flat file name inside one container.

use async_trait::async_trait;
use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub mod filesystem;

pub use filesystem::FilesystemBlobStore;

/// Errors that can occur during blob storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid blob name: {0}")]
    InvalidName(String),

    #[error("blob exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named blob storage
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `name`, replacing any previous blob.
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Check whether a blob exists.
    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Delete a blob.
    ///
    /// Returns `true` if the blob was deleted, `false` if it did not exist.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}

/// Reject names that could escape the container directory
pub(crate) fn validate_name(name: &str) -> Result<(), StorageError> {
    let flat = !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && name != "..";
    if flat {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("4b1c.png").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../secrets").is_err());
        assert!(validate_name("nested/file.jpg").is_err());
        assert!(validate_name(".hidden").is_err());
    }
}
