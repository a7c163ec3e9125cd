//! Image name generation.

use std::path::Path;

use imobifx_core::constants::DEFAULT_IMAGE_EXTENSION;
use uuid::Uuid;

const MAX_EXTENSION_LEN: usize = 10;

/// Lowercased `.ext` of the client file name, when it is plain alphanumeric.
fn extension_of(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{}", ext.to_ascii_lowercase()))
}

/// Generate a unique storage name for an uploaded image.
///
/// Produces `{uuid}{.ext}` keeping the original extension, or `{uuid}.bin`
/// when the upload has none.
pub fn generate_image_name(original_file_name: Option<&str>) -> String {
    let ext = original_file_name
        .and_then(extension_of)
        .unwrap_or_else(|| DEFAULT_IMAGE_EXTENSION.to_string());
    format!("{}{}", Uuid::new_v4(), ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_lowercased_extension() {
        let name = generate_image_name(Some("Casa Praia.JPG"));
        assert!(name.ends_with(".jpg"));
        assert!(Uuid::parse_str(name.trim_end_matches(".jpg")).is_ok());
    }

    #[test]
    fn test_default_extension() {
        assert!(generate_image_name(None).ends_with(".bin"));
        assert!(generate_image_name(Some("photo")).ends_with(".bin"));
        assert!(generate_image_name(Some("photo.")).ends_with(".bin"));
        assert!(generate_image_name(Some("photo.p g")).ends_with(".bin"));
    }

    #[test]
    fn test_only_file_name_extension_is_used() {
        let name = generate_image_name(Some("../../etc/passwd.png"));
        assert!(!name.contains('/'));
        assert!(name.ends_with(".png"));
    }

    #[test]
    fn test_names_are_unique() {
        assert_ne!(
            generate_image_name(Some("a.png")),
            generate_image_name(Some("a.png"))
        );
    }
}
