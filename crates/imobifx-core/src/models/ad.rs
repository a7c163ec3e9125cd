use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Kind of listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AdType {
    Sale,
    Rent,
}

impl AdType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdType::Sale => "SALE",
            AdType::Rent => "RENT",
        }
    }
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdType {
    type Err = AppError;

    /// Exact match on the wire names; callers uppercase beforehand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALE" => Ok(AdType::Sale),
            "RENT" => Ok(AdType::Rent),
            _ => Err(AppError::field("type", "must be SALE or RENT")),
        }
    }
}

impl TryFrom<String> for AdType {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A persisted listing. Never updated once stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ad {
    pub id: Uuid,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type", try_from = "String"))]
    pub ad_type: AdType,
    pub price_brl: Decimal,
    /// Storage-relative image name, not a path.
    pub image_path: Option<String>,
    /// Canonical `NNNNN-NNN`.
    pub cep: String,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

/// Raw ad draft as submitted by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAdInput {
    #[serde(rename = "type")]
    pub ad_type: String,
    pub price_brl: Decimal,
    pub cep: String,
    pub street: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// A validated, normalized ad ready to be stored.
///
/// Only produced by `validate_create_ad_input`; the repository assigns
/// `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAd {
    pub ad_type: AdType,
    pub price_brl: Decimal,
    pub image_path: Option<String>,
    pub cep: String,
    pub street: String,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

impl NewAd {
    pub fn with_image(mut self, image_path: Option<String>) -> Self {
        self.image_path = image_path;
        self
    }

    /// Materialize the stored record.
    pub fn into_ad(self, id: Uuid, created_at: DateTime<Utc>) -> Ad {
        Ad {
            id,
            ad_type: self.ad_type,
            price_brl: self.price_brl,
            image_path: self.image_path,
            cep: self.cep,
            street: self.street,
            number: self.number,
            complement: self.complement,
            neighborhood: self.neighborhood,
            city: self.city,
            state: self.state,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdAddress {
    #[schema(example = "58000-000")]
    pub cep: String,
    pub street: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
}

/// Read-side view of an ad, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub ad_type: AdType,
    #[schema(value_type = f64)]
    pub price_brl: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub price_usd: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/static/images/3f2c9a7e-1b4d-4c8e-9f0a-2d6b8e5c7a11.jpg")]
    pub image_url: Option<String>,
    pub address: AdAddress,
    pub created_at: DateTime<Utc>,
}
