//! Blob Storage
//!
//! Store-by-generated-name, delete-by-name, read-by-name. Assets are
//! always stored under a random name; the caller records that name on the
//! owning entity. Names never contain path separators, so a stored name
//! can be used in URLs directly.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::crypto::random_hex;

/// Blob storage errors
#[derive(Debug, Error)]
pub enum BlobError {
    /// No blob with the given name
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// Name contains path separators or is empty
    #[error("Invalid blob name: {0}")]
    InvalidName(String),

    /// Underlying I/O failure
    #[error("Blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Blob storage trait
#[trait_variant::make(BlobStore: Send)]
pub trait LocalBlobStore {
    /// Store bytes under a freshly generated name with the given
    /// extension; returns the generated name.
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, BlobError>;

    /// Delete a blob by name
    async fn delete(&self, name: &str) -> Result<(), BlobError>;

    /// Read a blob's bytes by name
    async fn read(&self, name: &str) -> Result<Vec<u8>, BlobError>;
}

/// Filesystem-backed blob store
#[derive(Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create a store rooted at the given directory, creating it if needed
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, BlobError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(BlobError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl BlobStore for FsBlobStore {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let name = format!("{}.{}", random_hex(16), extension);
        let path = self.path_for(&name)?;
        tokio::fs::write(&path, bytes).await?;
        Ok(name)
    }

    async fn delete(&self, name: &str) -> Result<(), BlobError> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, BlobError> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl FsBlobStore {
    /// Root directory (for serving or inspection)
    pub fn root(&self) -> &Path {
        &self.root
    }
}
