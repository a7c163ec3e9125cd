//! Error types module
//!
//! All failures surfaced by the listing pipeline are unified under the `AppError` enum.
//! Client-caused variants carry their detail payload (violated fields, offending values)
//! as typed data so the HTTP boundary can render it without parsing messages.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for degraded dependencies
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "VALIDATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Structured detail payload (violated fields, offending values)
    fn details(&self) -> Option<serde_json::Value>;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// One violated input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects every violation of an input before failing.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldViolation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All recorded violations as a validation error.
    pub fn into_error(self) -> AppError {
        AppError::Validation(self.0)
    }

    /// `Ok(())` when nothing was recorded, otherwise `AppError::Validation` with all of them.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.0))
        }
    }
}

fn field_names(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {}", field_names(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Invalid CEP: {raw}")]
    InvalidPostalCode { raw: String },

    #[error("CEP not found: {raw}")]
    AddressNotFound { raw: String },

    #[error("Address directory unavailable")]
    AddressServiceUnavailable,

    #[error("Image too large (max: {max_bytes} bytes)")]
    ImageTooLarge { max_bytes: u64 },

    #[error("Unsupported image type: {content_type}")]
    UnsupportedImageType { content_type: String },

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Shorthand for a validation error on a single field.
    pub fn field(field: &str, message: &str) -> Self {
        AppError::Validation(vec![FieldViolation::new(field, message)])
    }

    /// Violated fields, empty for non-validation errors.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            AppError::Validation(v) => v,
            _ => &[],
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Validation(_) => (
            400,
            "VALIDATION_ERROR",
            false,
            Some("Fix the listed fields and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidPostalCode { .. } => (
            400,
            "CEP_INVALID",
            false,
            Some("Use a CEP with 8 digits"),
            false,
            LogLevel::Debug,
        ),
        AppError::AddressNotFound { .. } => (
            404,
            "CEP_NOT_FOUND",
            false,
            Some("Check the CEP or fill in the address manually"),
            false,
            LogLevel::Debug,
        ),
        AppError::AddressServiceUnavailable => (
            503,
            "VIA_CEP_UNAVAILABLE",
            true,
            Some("Fill in the address manually"),
            false,
            LogLevel::Warn,
        ),
        AppError::ImageTooLarge { .. } => (
            400,
            "IMAGE_TOO_LARGE",
            false,
            Some("Reduce the image size"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedImageType { .. } => (
            400,
            "UNSUPPORTED_IMAGE_TYPE",
            false,
            Some("Upload a JPEG, PNG or WebP image"),
            false,
            LogLevel::Debug,
        ),
        AppError::Database(_) => (
            500,
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Storage(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            None,
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::InvalidPostalCode { .. } => "InvalidPostalCode",
            AppError::AddressNotFound { .. } => "AddressNotFound",
            AppError::AddressServiceUnavailable => "AddressServiceUnavailable",
            AppError::ImageTooLarge { .. } => "ImageTooLarge",
            AppError::UnsupportedImageType { .. } => "UnsupportedImageType",
            AppError::Database(_) => "Database",
            AppError::Storage(_) => "Storage",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Invalid data".to_string(),
            AppError::InvalidPostalCode { .. } => "Invalid CEP. Use 8 digits".to_string(),
            AppError::AddressNotFound { .. } => "CEP not found".to_string(),
            AppError::AddressServiceUnavailable => {
                "Unable to look up the CEP right now. Fill in the address manually".to_string()
            }
            AppError::ImageTooLarge { .. } => "Image exceeds the maximum size".to_string(),
            AppError::UnsupportedImageType { .. } => {
                "Unsupported image type (jpeg/png/webp)".to_string()
            }
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation(violations) => Some(json!({ "violations": violations })),
            AppError::InvalidPostalCode { raw } | AppError::AddressNotFound { raw } => {
                Some(json!({ "cep": raw }))
            }
            AppError::ImageTooLarge { max_bytes } => Some(json!({ "max_bytes": max_bytes })),
            AppError::UnsupportedImageType { content_type } => {
                Some(json!({ "content_type": content_type }))
            }
            _ => None,
        }
    }
}
