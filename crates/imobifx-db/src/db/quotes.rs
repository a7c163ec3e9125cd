use async_trait::async_trait;
use chrono::{DateTime, Utc};
use imobifx_core::models::Quote;
use imobifx_core::AppError;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use super::QuotesRepository;

/// PostgreSQL-backed quote repository
#[derive(Clone)]
pub struct PgQuotesRepository {
    pool: PgPool,
}

impl PgQuotesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuotesRepository for PgQuotesRepository {
    #[tracing::instrument(skip(self), fields(db.table = "quotes", db.operation = "insert"))]
    async fn create_quote(
        &self,
        brl_to_usd: Decimal,
        effective_at: DateTime<Utc>,
    ) -> Result<Quote, AppError> {
        let quote = sqlx::query_as::<Postgres, Quote>(
            r#"
            INSERT INTO quotes (brl_to_usd, effective_at)
            VALUES ($1, $2)
            RETURNING id, brl_to_usd, effective_at, created_at
            "#,
        )
        .bind(brl_to_usd)
        .bind(effective_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(quote)
    }

    #[tracing::instrument(skip(self), fields(db.table = "quotes", db.operation = "select"))]
    async fn current_quote(&self) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<Postgres, Quote>(
            r#"
            SELECT id, brl_to_usd, effective_at, created_at
            FROM quotes
            ORDER BY effective_at DESC, created_at DESC, seq DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(quote)
    }
}
