//! Address lookup by CEP.

use std::sync::Arc;

use async_trait::async_trait;
use imobifx_core::models::Address;
use imobifx_core::validation::normalize_cep;
use imobifx_core::AppError;
use thiserror::Error;

/// Failure modes of the external address directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("CEP not found")]
    NotFound,

    #[error("Directory unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid directory response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// External directory resolving an 8-digit CEP to an address.
#[async_trait]
pub trait AddressDirectory: Send + Sync {
    async fn lookup(&self, cep_digits: &str) -> Result<Address, DirectoryError>;
}

#[derive(Clone)]
pub struct AddressService {
    directory: Arc<dyn AddressDirectory>,
}

impl AddressService {
    pub fn new(directory: Arc<dyn AddressDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve a CEP in any accepted spelling.
    ///
    /// The directory's answer is returned as is.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, raw_cep: &str) -> Result<Address, AppError> {
        let digits = normalize_cep(raw_cep).ok_or_else(|| AppError::InvalidPostalCode {
            raw: raw_cep.to_string(),
        })?;

        match self.directory.lookup(&digits).await {
            Ok(address) => Ok(address),
            Err(DirectoryError::NotFound) => Err(AppError::AddressNotFound {
                raw: raw_cep.to_string(),
            }),
            Err(DirectoryError::Unavailable(reason))
            | Err(DirectoryError::InvalidResponse(reason)) => {
                tracing::warn!(cep = %digits, reason = %reason, "Address directory unavailable");
                Err(AppError::AddressServiceUnavailable)
            }
            Err(DirectoryError::Other(err)) => Err(err.into()),
        }
    }
}
