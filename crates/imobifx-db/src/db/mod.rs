//! Database repositories for data access layer
//!
//! Services only see the `AdsRepository` and `QuotesRepository` traits; the
//! backend is picked once at startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use imobifx_core::models::{Ad, AdsFilter, NewAd, Quote};
use imobifx_core::AppError;
use rust_decimal::Decimal;

pub mod ads;
pub mod memory;
pub mod quotes;

pub use ads::PgAdsRepository;
pub use memory::MemoryRepository;
pub use quotes::PgQuotesRepository;

/// Trait for ad storage and filtered listing
#[async_trait]
pub trait AdsRepository: Send + Sync {
    /// Persist a validated ad; storage assigns `id` and `created_at`.
    async fn create_ad(&self, ad: NewAd) -> Result<Ad, AppError>;

    /// One page of ads matching `filter`, newest first, plus the total match count.
    ///
    /// `page` is 1-based; callers validate `page >= 1` and `page_size` beforehand.
    async fn list_ads(
        &self,
        filter: &AdsFilter,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Ad>, i64), AppError>;
}

/// Trait for the append-only quote table
#[async_trait]
pub trait QuotesRepository: Send + Sync {
    async fn create_quote(
        &self,
        brl_to_usd: Decimal,
        effective_at: DateTime<Utc>,
    ) -> Result<Quote, AppError>;

    /// Latest `effective_at`; ties go to the latest `created_at`, then to the
    /// most recently inserted quote. `None` when no quote exists.
    async fn current_quote(&self) -> Result<Option<Quote>, AppError>;
}

/// Rows to skip for a 1-based page. Saturates at `i64::MAX`, which reads as
/// an empty page.
pub(crate) fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1)
        .checked_mul(page_size.max(0))
        .unwrap_or(i64::MAX)
}
