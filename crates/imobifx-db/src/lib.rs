//! ImobiFX Database Library
//!
//! Repository contracts for ads and quotes, with a PostgreSQL implementation
//! (sqlx) and an in-memory one sharing the same filter, ordering and
//! tie-break semantics.

pub mod db;

pub use db::{
    AdsRepository, MemoryRepository, PgAdsRepository, PgQuotesRepository, QuotesRepository,
};
pub use imobifx_core::models::AdsFilter;
