use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use imobifx_core::models::Quote;
use imobifx_core::AppError;
use imobifx_db::QuotesRepository;
use rust_decimal::Decimal;

/// Creates quotes and answers which one is current.
#[derive(Clone)]
pub struct QuoteService {
    repo: Arc<dyn QuotesRepository>,
}

impl QuoteService {
    pub fn new(repo: Arc<dyn QuotesRepository>) -> Self {
        Self { repo }
    }

    /// Store a quote effective at `effective_at` (converted to UTC), or now.
    ///
    /// The rate is expected to be validated already.
    #[tracing::instrument(skip(self))]
    pub async fn create(
        &self,
        brl_to_usd: Decimal,
        effective_at: Option<DateTime<FixedOffset>>,
    ) -> Result<Quote, AppError> {
        let effective_at = effective_at
            .map(|at| at.with_timezone(&Utc))
            .unwrap_or_else(Utc::now);

        let quote = self.repo.create_quote(brl_to_usd, effective_at).await?;

        tracing::info!(
            quote_id = %quote.id,
            brl_to_usd = %quote.brl_to_usd,
            effective_at = %quote.effective_at,
            "Quote created"
        );

        Ok(quote)
    }

    /// The quote with the latest `effective_at`, if any.
    pub async fn current(&self) -> Result<Option<Quote>, AppError> {
        self.repo.current_quote().await
    }
}
