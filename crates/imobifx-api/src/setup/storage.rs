//! Image storage setup

use anyhow::{Context, Result};
use imobifx_core::Config;
use imobifx_storage::{ImageStorage, LocalImageStorage};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn ImageStorage>> {
    let storage = LocalImageStorage::new(&config.images_dir)
        .await
        .with_context(|| format!("Failed to prepare images dir {}", config.images_dir.display()))?;

    tracing::info!(
        images_dir = %storage.base_path().display(),
        max_image_bytes = config.max_image_bytes,
        "Image storage initialized"
    );

    Ok(Arc::new(storage))
}
