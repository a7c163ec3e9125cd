//! Image storage abstraction
//!
//! This module defines the `ImageStorage` trait the ads service writes through.

use std::pin::Pin;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Image content, consumed until EOF.
pub type ImageReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Image storage abstraction trait
///
/// Implementations must never leave a partially written image behind: when a
/// write fails, whatever was created for it is removed before returning.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store an image and return its generated name.
    ///
    /// `original_file_name` only contributes its extension.
    async fn store(
        &self,
        original_file_name: Option<&str>,
        reader: ImageReader,
    ) -> StorageResult<String>;

    /// Delete an image by name. Missing images are not an error.
    async fn delete(&self, name: &str) -> StorageResult<()>;
}

impl From<StorageError> for imobifx_core::AppError {
    fn from(err: StorageError) -> Self {
        imobifx_core::AppError::Storage(err.to_string())
    }
}
