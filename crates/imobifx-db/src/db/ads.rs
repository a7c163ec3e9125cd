use async_trait::async_trait;
use imobifx_core::models::{Ad, AdsFilter, NewAd};
use imobifx_core::AppError;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{page_offset, AdsRepository};

const AD_COLUMNS: &str = "id, type, price_brl, image_path, cep, street, number, complement, \
                          neighborhood, city, state, created_at";

/// PostgreSQL-backed ads repository
#[derive(Clone)]
pub struct PgAdsRepository {
    pool: PgPool,
}

impl PgAdsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `WHERE` conditions for every present filter field, all bound.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &AdsFilter) {
    builder.push(" WHERE TRUE");

    if let Some(ad_type) = filter.ad_type {
        builder.push(" AND type = ").push_bind(ad_type.as_str());
    }
    if let Some(city) = &filter.city {
        builder.push(" AND city = ").push_bind(city.clone());
    }
    if let Some(state) = &filter.state {
        builder.push(" AND state = ").push_bind(state.clone());
    }
    if let Some(min_price) = filter.min_price {
        builder.push(" AND price_brl >= ").push_bind(min_price);
    }
    if let Some(max_price) = filter.max_price {
        builder.push(" AND price_brl <= ").push_bind(max_price);
    }
}

#[async_trait]
impl AdsRepository for PgAdsRepository {
    #[tracing::instrument(skip(self, ad), fields(db.table = "ads", db.operation = "insert"))]
    async fn create_ad(&self, ad: NewAd) -> Result<Ad, AppError> {
        let query = format!(
            r#"
            INSERT INTO ads (type, price_brl, image_path, cep, street, number, complement,
                             neighborhood, city, state)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            AD_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, Ad>(&query)
            .bind(ad.ad_type.as_str())
            .bind(ad.price_brl)
            .bind(&ad.image_path)
            .bind(&ad.cep)
            .bind(&ad.street)
            .bind(&ad.number)
            .bind(&ad.complement)
            .bind(&ad.neighborhood)
            .bind(&ad.city)
            .bind(&ad.state)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to insert ad");
                AppError::from(e)
            })?;

        tracing::debug!(ad_id = %created.id, "Ad inserted");
        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "ads", db.operation = "select"))]
    async fn list_ads(
        &self,
        filter: &AdsFilter,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Ad>, i64), AppError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM ads");
        push_filter(&mut count, filter);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM ads", AD_COLUMNS));
        push_filter(&mut select, filter);
        select
            .push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page_size)
            .push(" OFFSET ")
            .push_bind(page_offset(page, page_size));

        let ads = select
            .build_query_as::<Ad>()
            .fetch_all(&self.pool)
            .await?;

        Ok((ads, total))
    }
}
