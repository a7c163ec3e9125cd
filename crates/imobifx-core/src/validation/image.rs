use crate::constants::ALLOWED_IMAGE_CONTENT_TYPES;
use crate::error::AppError;
use crate::models::ImageUpload;

fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    ALLOWED_IMAGE_CONTENT_TYPES.contains(&essence.as_str())
}

/// No image is always fine. Size is checked before content type.
pub fn validate_image(image: Option<&ImageUpload>, max_bytes: u64) -> Result<(), AppError> {
    let Some(image) = image else {
        return Ok(());
    };

    if image.size() > max_bytes {
        return Err(AppError::ImageTooLarge { max_bytes });
    }

    if !is_allowed_content_type(&image.content_type) {
        return Err(AppError::UnsupportedImageType {
            content_type: image.content_type.clone(),
        });
    }

    Ok(())
}
