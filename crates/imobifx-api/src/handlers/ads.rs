//! Ad submission (multipart) and listing handlers

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use imobifx_core::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use imobifx_core::models::{AdItem, AdsListResponse, CreateAdInput, ImageUpload, ListAdsInput};
use imobifx_core::{AppError, Violations};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{non_empty, parse_decimal, NUMBER_MESSAGE};
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

fn multipart_error(err: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("Invalid multipart body: {}", err))
}

/// Bind the multipart form into a draft and an optional image.
async fn read_ad_form(
    mut multipart: Multipart,
) -> Result<(CreateAdInput, Option<ImageUpload>), AppError> {
    let mut input = CreateAdInput::default();
    let mut price_raw = String::new();
    let mut image = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().and_then(non_empty);
            let content_type = field
                .content_type()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string();
            let data = field.bytes().await.map_err(multipart_error)?;

            // browsers send an empty part when no file was picked
            if data.is_empty() && file_name.is_none() {
                continue;
            }
            image = Some(ImageUpload::new(file_name, content_type, data));
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        let value = value.trim();
        match name.as_str() {
            "type" => input.ad_type = value.to_ascii_uppercase(),
            "price_brl" => price_raw = value.to_string(),
            "cep" => input.cep = value.to_string(),
            "street" => input.street = value.to_string(),
            "number" => input.number = non_empty(value),
            "complement" => input.complement = non_empty(value),
            "neighborhood" => input.neighborhood = value.to_string(),
            "city" => input.city = value.to_string(),
            "state" => input.state = value.to_ascii_uppercase(),
            _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    input.price_brl =
        parse_decimal(&price_raw).ok_or_else(|| AppError::field("price_brl", NUMBER_MESSAGE))?;

    Ok((input, image))
}

/// Publish an ad
///
/// Multipart fields: `type`, `price_brl`, `cep`, `street`, `number`, `complement`,
/// `neighborhood`, `city`, `state` and an optional `image` file.
#[utoipa::path(
    post,
    path = "/api/ads",
    tag = "ads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Ad published", body = AdItem),
        (status = 400, description = "Invalid ad or image", body = ErrorResponse),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn create_ad(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<AdItem>), HttpAppError> {
    let multipart = multipart.map_err(|rejection| multipart_error(rejection.body_text()))?;
    let (input, image) = read_ad_form(multipart).await?;

    let ad = state.ads.create(&input, image).await?;

    Ok((StatusCode::CREATED, Json(AdItem::project(ad, None))))
}

/// Raw listing query. Every value arrives as text and is parsed leniently.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAdsQuery {
    /// Page number, defaults to 1
    page: Option<String>,
    /// Items per page (1 to 50), defaults to 10
    page_size: Option<String>,
    /// SALE or RENT
    #[serde(rename = "type")]
    ad_type: Option<String>,
    city: Option<String>,
    /// Two-letter state code
    state: Option<String>,
    min_price: Option<String>,
    max_price: Option<String>,
}

impl ListAdsQuery {
    fn into_input(self) -> Result<ListAdsInput, AppError> {
        let mut violations = Violations::new();
        let mut price = |field: &str, raw: Option<String>| {
            let raw = raw.as_deref().and_then(non_empty)?;
            let parsed = parse_decimal(&raw);
            if parsed.is_none() {
                violations.push(field, NUMBER_MESSAGE);
            }
            parsed
        };
        let min_price = price("min_price", self.min_price);
        let max_price = price("max_price", self.max_price);
        violations.into_result()?;

        Ok(ListAdsInput {
            page: parse_or(self.page, DEFAULT_PAGE),
            page_size: parse_or(self.page_size, DEFAULT_PAGE_SIZE),
            ad_type: self
                .ad_type
                .as_deref()
                .and_then(non_empty)
                .map(|t| t.to_ascii_uppercase()),
            city: self.city.as_deref().and_then(non_empty),
            state: self
                .state
                .as_deref()
                .and_then(non_empty)
                .map(|s| s.to_ascii_uppercase()),
            min_price,
            max_price,
        })
    }
}

fn parse_or(raw: Option<String>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// List ads, newest first, priced in USD with the current quote
#[utoipa::path(
    get,
    path = "/api/ads",
    tag = "ads",
    params(ListAdsQuery),
    responses(
        (status = 200, description = "One page of ads", body = AdsListResponse),
        (status = 400, description = "Invalid query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_ads(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAdsQuery>,
) -> Result<Json<AdsListResponse>, HttpAppError> {
    let input = query.into_input()?;
    let response = state.ads.list(&input).await?;
    Ok(Json(response))
}
