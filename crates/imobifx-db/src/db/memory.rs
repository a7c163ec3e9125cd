//! In-memory repository
//!
//! Backs both repository traits with process-local state. Used by tests and by
//! `REPOSITORY_BACKEND=memory` for local runs without PostgreSQL.

use std::cmp::Reverse;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use imobifx_core::models::{Ad, AdsFilter, NewAd, Quote};
use imobifx_core::AppError;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{page_offset, AdsRepository, QuotesRepository};

/// Rows tagged with their insertion sequence.
#[derive(Default)]
struct State {
    next_seq: u64,
    ads: Vec<(u64, Ad)>,
    quotes: Vec<(u64, Quote)>,
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an ad with a caller-chosen creation time.
    pub async fn insert_ad_at(&self, ad: NewAd, created_at: DateTime<Utc>) -> Ad {
        let mut state = self.state.write().await;
        let seq = state.next_seq();
        let ad = ad.into_ad(Uuid::new_v4(), created_at);
        state.ads.push((seq, ad.clone()));
        ad
    }

    /// Store a quote with a caller-chosen creation time.
    pub async fn insert_quote_at(
        &self,
        brl_to_usd: Decimal,
        effective_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Quote {
        let mut state = self.state.write().await;
        let seq = state.next_seq();
        let quote = Quote {
            id: Uuid::new_v4(),
            brl_to_usd,
            effective_at,
            created_at,
        };
        state.quotes.push((seq, quote.clone()));
        quote
    }
}

#[async_trait]
impl AdsRepository for MemoryRepository {
    #[tracing::instrument(skip(self, ad), fields(db.table = "ads", db.operation = "insert"))]
    async fn create_ad(&self, ad: NewAd) -> Result<Ad, AppError> {
        Ok(self.insert_ad_at(ad, Utc::now()).await)
    }

    #[tracing::instrument(skip(self), fields(db.table = "ads", db.operation = "select"))]
    async fn list_ads(
        &self,
        filter: &AdsFilter,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Ad>, i64), AppError> {
        let state = self.state.read().await;

        let mut matching: Vec<&(u64, Ad)> = state
            .ads
            .iter()
            .filter(|(_, ad)| filter.matches(ad))
            .collect();
        matching.sort_by_key(|(seq, ad)| Reverse((ad.created_at, *seq)));

        let total = matching.len() as i64;
        let offset = usize::try_from(page_offset(page, page_size)).unwrap_or(usize::MAX);
        let limit = usize::try_from(page_size).unwrap_or(0);

        let ads = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, ad)| ad.clone())
            .collect();

        Ok((ads, total))
    }
}

#[async_trait]
impl QuotesRepository for MemoryRepository {
    #[tracing::instrument(skip(self), fields(db.table = "quotes", db.operation = "insert"))]
    async fn create_quote(
        &self,
        brl_to_usd: Decimal,
        effective_at: DateTime<Utc>,
    ) -> Result<Quote, AppError> {
        Ok(self.insert_quote_at(brl_to_usd, effective_at, Utc::now()).await)
    }

    #[tracing::instrument(skip(self), fields(db.table = "quotes", db.operation = "select"))]
    async fn current_quote(&self) -> Result<Option<Quote>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .quotes
            .iter()
            .max_by_key(|(seq, q)| (q.effective_at, q.created_at, *seq))
            .map(|(_, q)| q.clone()))
    }
}
