//! Service wiring

use anyhow::Result;
use imobifx_core::Config;
use imobifx_services::{AddressService, AdsService, QuoteService, ViaCepClient};
use imobifx_storage::ImageStorage;
use std::sync::Arc;

use super::database::Repositories;
use crate::state::AppState;

pub fn initialize_services(
    config: &Config,
    repositories: Repositories,
    storage: Arc<dyn ImageStorage>,
) -> Result<Arc<AppState>> {
    let via_cep = ViaCepClient::new(config.via_cep_base_url.clone(), config.via_cep_timeout)?;
    tracing::info!(
        base_url = %config.via_cep_base_url,
        timeout_ms = config.via_cep_timeout.as_millis() as u64,
        "ViaCEP client initialized"
    );

    Ok(Arc::new(AppState {
        ads: AdsService::new(
            repositories.ads,
            repositories.quotes.clone(),
            storage,
            config.max_image_bytes,
        ),
        quotes: QuoteService::new(repositories.quotes),
        addresses: AddressService::new(Arc::new(via_cep)),
    }))
}
