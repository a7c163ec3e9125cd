use bytes::Bytes;

/// An image part received with an ad submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side file name, used only for its extension.
    pub file_name: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(file_name: Option<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            data,
        }
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}
