//! ImobiFX Storage Library
//!
//! Persistence of ad images. Images are stored under a flat, collision-resistant
//! name (`{uuid}{ext}`); that name is what ads reference and what the public
//! `/static/images/` route serves.
//!
//! Names must not contain `..`, path separators or a leading `/`. Name generation
//! lives in the `keys` module so every backend agrees on the layout.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::generate_image_name;
pub use local::LocalImageStorage;
pub use traits::{ImageReader, ImageStorage, StorageError, StorageResult};
