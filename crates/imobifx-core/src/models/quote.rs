use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// BRL to USD exchange rate, effective from `effective_at`.
///
/// Quotes are append-only; the current one is the quote with the latest
/// `effective_at`, ties going to the most recently created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Quote {
    pub id: Uuid,
    #[schema(value_type = f64)]
    pub brl_to_usd: Decimal,
    pub effective_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Request body for registering a quote.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateQuoteInput {
    /// Absent reads as zero and is rejected by validation.
    #[serde(default)]
    #[schema(value_type = f64, example = 0.19)]
    pub brl_to_usd: Decimal,
    /// RFC 3339 timestamp; absent or empty means "now".
    #[serde(default)]
    #[schema(example = "2026-02-16T10:00:00Z")]
    pub effective_at: Option<String>,
}

/// The quote a listing was priced with.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct QuoteUsed {
    #[schema(value_type = f64)]
    pub brl_to_usd: Decimal,
    pub effective_at: DateTime<Utc>,
}

impl From<&Quote> for QuoteUsed {
    fn from(quote: &Quote) -> Self {
        QuoteUsed {
            brl_to_usd: quote.brl_to_usd,
            effective_at: quote.effective_at,
        }
    }
}
