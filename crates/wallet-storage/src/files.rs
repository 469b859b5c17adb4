//! Path-addressed durable byte storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Byte storage addressed by paths relative to a store root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Absolute location of a relative path inside the store.
    fn resolve(&self, relative: &Path) -> PathBuf;

    async fn exists(&self, relative: &Path) -> Result<bool, StorageError>;

    async fn read(&self, relative: &Path) -> Result<Vec<u8>, StorageError>;

    /// Write the full contents. Readers never observe a partial file.
    async fn write(&self, relative: &Path, contents: &[u8]) -> Result<(), StorageError>;
}

/// File store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    async fn exists(&self, relative: &Path) -> Result<bool, StorageError> {
        Ok(tokio::fs::try_exists(self.resolve(relative)).await?)
    }

    async fn read(&self, relative: &Path) -> Result<Vec<u8>, StorageError> {
        Ok(tokio::fs::read(self.resolve(relative)).await?)
    }

    async fn write(&self, relative: &Path, contents: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, contents).await?;
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = contents.len(), "file written");
        Ok(())
    }
}
