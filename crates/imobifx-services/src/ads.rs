//! Ad creation and listing
//!
//! Creation validates the draft and the image before any I/O, stores the image
//! (if any) under a generated name and then persists the ad. A failed insert
//! removes the stored image again. Listing prices every item in USD with the
//! current quote.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use imobifx_core::models::{
    Ad, AdItem, AdsFilter, AdsListResponse, CreateAdInput, ImageUpload, ListAdsInput, QuoteUsed,
};
use imobifx_core::validation::{validate_create_ad_input, validate_image, validate_list_ads_input};
use imobifx_core::AppError;
use imobifx_db::{AdsRepository, QuotesRepository};
use imobifx_storage::ImageStorage;

#[derive(Clone)]
pub struct AdsService {
    ads: Arc<dyn AdsRepository>,
    quotes: Arc<dyn QuotesRepository>,
    storage: Arc<dyn ImageStorage>,
    max_image_bytes: u64,
}

impl AdsService {
    pub fn new(
        ads: Arc<dyn AdsRepository>,
        quotes: Arc<dyn QuotesRepository>,
        storage: Arc<dyn ImageStorage>,
        max_image_bytes: u64,
    ) -> Self {
        Self {
            ads,
            quotes,
            storage,
            max_image_bytes,
        }
    }

    #[tracing::instrument(skip(self, input, image), fields(has_image = image.is_some()))]
    pub async fn create(
        &self,
        input: &CreateAdInput,
        image: Option<ImageUpload>,
    ) -> Result<Ad, AppError> {
        let new_ad = validate_create_ad_input(input)?;
        validate_image(image.as_ref(), self.max_image_bytes)?;

        let image_path = match image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        match self.ads.create_ad(new_ad.with_image(image_path.clone())).await {
            Ok(ad) => {
                tracing::info!(
                    ad_id = %ad.id,
                    ad_type = %ad.ad_type,
                    cep = %ad.cep,
                    image = ?ad.image_path,
                    "Ad created"
                );
                Ok(ad)
            }
            Err(e) => {
                if let Some(name) = image_path {
                    self.discard_image(&name).await;
                }
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self, input: &ListAdsInput) -> Result<AdsListResponse, AppError> {
        validate_list_ads_input(input)?;
        let filter = AdsFilter::try_from(input)?;

        let quote = self.quotes.current_quote().await?;
        let (ads, total) = self
            .ads
            .list_ads(&filter, input.page, input.page_size)
            .await?;

        let items = ads
            .into_iter()
            .map(|ad| AdItem::project(ad, quote.as_ref()))
            .collect();

        Ok(AdsListResponse {
            page: input.page,
            page_size: input.page_size,
            total,
            quote_used: quote.as_ref().map(QuoteUsed::from),
            items,
        })
    }

    async fn store_image(&self, image: ImageUpload) -> Result<String, AppError> {
        let start = Instant::now();
        let size = image.size();
        let reader = Box::pin(Cursor::new(image.data));

        let name = self
            .storage
            .store(image.file_name.as_deref(), reader)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, size_bytes = size, "Failed to store ad image");
                AppError::from(e)
            })?;

        tracing::debug!(
            name = %name,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Ad image stored"
        );
        Ok(name)
    }

    /// Best-effort removal of an image whose ad was never stored.
    async fn discard_image(&self, name: &str) {
        if let Err(e) = self.storage.delete(name).await {
            tracing::warn!(error = %e, name = %name, "Failed to remove orphaned ad image");
        }
    }
}
