//! ImobiFX Core Library
//!
//! Domain models, the error taxonomy, configuration and input validation shared
//! by every ImobiFX crate. Nothing in here performs I/O beyond reading the
//! process environment for configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, Environment, RepositoryBackend};
pub use error::{AppError, ErrorMetadata, FieldViolation, LogLevel, Violations};
