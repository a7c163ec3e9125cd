use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::keys::generate_image_name;
use crate::traits::{ImageReader, ImageStorage, StorageError, StorageResult};

/// Local filesystem image storage
///
/// Every image lives directly under `base_path`, named by [`generate_image_name`].
#[derive(Clone, Debug)]
pub struct LocalImageStorage {
    base_path: PathBuf,
}

impl LocalImageStorage {
    /// Create a new LocalImageStorage rooted at `base_path` (e.g. "./data/images"),
    /// creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create images directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalImageStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Resolve an image name to its file, rejecting anything that could
    /// escape the images directory.
    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        if name.is_empty()
            || name.contains("..")
            || name.contains('/')
            || name.contains('\\')
            || name.starts_with('.')
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.base_path.join(name))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write(&self, path: &Path, mut reader: ImageReader) -> StorageResult<u64> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to write image to {}: {}",
                path.display(),
                e
            ))
        })?;

        file.flush().await?;
        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(bytes_copied)
    }

    /// Best-effort removal of a partially written image.
    async fn discard(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed partially written image")
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                error = %e,
                path = %path.display(),
                "Failed to remove partially written image"
            ),
        }
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(
        &self,
        original_file_name: Option<&str>,
        reader: ImageReader,
    ) -> StorageResult<String> {
        let name = generate_image_name(original_file_name);
        let path = self.name_to_path(&name)?;
        let start = Instant::now();

        self.ensure_parent_dir(&path).await?;

        match self.write(&path, reader).await {
            Ok(size) => {
                tracing::info!(
                    path = %path.display(),
                    name = %name,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Image stored"
                );
                Ok(name)
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Image write failed");
                self.discard(&path).await;
                Err(e)
            }
        }
    }

    async fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.name_to_path(name)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), name = %name, "Image deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
