use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, IMAGE_URL_PREFIX, USD_PRICE_SCALE};
use crate::error::AppError;

use super::{Ad, AdAddress, AdItem, AdType, Quote, QuoteUsed};

/// Listing query as bound from the request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListAdsInput {
    pub page: i64,
    pub page_size: i64,
    #[serde(rename = "type")]
    pub ad_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl Default for ListAdsInput {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            ad_type: None,
            city: None,
            state: None,
            min_price: None,
            max_price: None,
        }
    }
}

/// Storage-side filter. Every present field must match; price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdsFilter {
    pub ad_type: Option<AdType>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl AdsFilter {
    pub fn matches(&self, ad: &Ad) -> bool {
        self.ad_type.map_or(true, |t| ad.ad_type == t)
            && self.city.as_deref().map_or(true, |c| ad.city == c)
            && self.state.as_deref().map_or(true, |s| ad.state == s)
            && self.min_price.map_or(true, |min| ad.price_brl >= min)
            && self.max_price.map_or(true, |max| ad.price_brl <= max)
    }
}

impl TryFrom<&ListAdsInput> for AdsFilter {
    type Error = AppError;

    fn try_from(input: &ListAdsInput) -> Result<Self, Self::Error> {
        Ok(AdsFilter {
            ad_type: input.ad_type.as_deref().map(str::parse).transpose()?,
            city: input.city.as_deref().map(|c| c.trim().to_string()),
            state: input.state.as_deref().map(|s| s.trim().to_ascii_uppercase()),
            min_price: input.min_price,
            max_price: input.max_price,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AdsListResponse {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_used: Option<QuoteUsed>,
    pub items: Vec<AdItem>,
}

/// `price_brl * rate`, rounded half-up to cents. `None` on overflow.
pub fn convert_brl_to_usd(price_brl: Decimal, brl_to_usd: Decimal) -> Option<Decimal> {
    price_brl
        .checked_mul(brl_to_usd)
        .map(|usd| usd.round_dp_with_strategy(USD_PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Public URL of a stored image, if there is one.
pub fn image_url(image_path: Option<&str>) -> Option<String> {
    image_path
        .filter(|name| !name.is_empty())
        .map(|name| format!("{}{}", IMAGE_URL_PREFIX, name))
}

impl AdItem {
    /// Project a stored ad, pricing it in USD when a quote is available.
    pub fn project(ad: Ad, quote: Option<&Quote>) -> Self {
        AdItem {
            id: ad.id,
            ad_type: ad.ad_type,
            price_brl: ad.price_brl,
            price_usd: quote.and_then(|q| convert_brl_to_usd(ad.price_brl, q.brl_to_usd)),
            image_url: image_url(ad.image_path.as_deref()),
            address: AdAddress {
                cep: ad.cep,
                street: ad.street,
                number: ad.number,
                complement: ad.complement,
                neighborhood: ad.neighborhood,
                city: ad.city,
                state: ad.state,
            },
            created_at: ad.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::str::FromStr;
    use uuid::Uuid;

    fn ad(price: &str, image_path: Option<&str>) -> Ad {
        Ad {
            id: Uuid::new_v4(),
            ad_type: AdType::Sale,
            price_brl: Decimal::from_str(price).unwrap(),
            image_path: image_path.map(str::to_string),
            cep: "58000-000".to_string(),
            street: "Rua A".to_string(),
            number: Some("10".to_string()),
            complement: None,
            neighborhood: "Centro".to_string(),
            city: "João Pessoa".to_string(),
            state: "PB".to_string(),
            created_at: Utc::now(),
        }
    }

    fn quote(rate: &str) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            brl_to_usd: Decimal::from_str(rate).unwrap(),
            effective_at: Utc::now(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_project_with_quote() {
        let item = AdItem::project(ad("100", None), Some(&quote("0.2")));
        assert_eq!(item.price_usd, Some(Decimal::from_str("20.00").unwrap()));
        assert_eq!(item.address.cep, "58000-000");
        assert!(item.image_url.is_none());
    }

    #[test]
    fn test_project_without_quote() {
        let item = AdItem::project(ad("100", Some("a.jpg")), None);
        assert!(item.price_usd.is_none());
        assert_eq!(item.image_url.as_deref(), Some("/static/images/a.jpg"));

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("price_usd").is_none());
        assert_eq!(json["type"], "SALE");
        assert!(json["address"].get("complement").is_none());
    }

    #[test]
    fn test_conversion_rounds_half_up() {
        let rate = Decimal::from_str("0.1").unwrap();
        assert_eq!(
            convert_brl_to_usd(Decimal::from_str("0.05").unwrap(), rate),
            Some(Decimal::from_str("0.01").unwrap())
        );
        assert_eq!(
            convert_brl_to_usd(Decimal::from_str("0.25").unwrap(), rate),
            Some(Decimal::from_str("0.03").unwrap())
        );
        assert_eq!(
            convert_brl_to_usd(Decimal::from_str("0.24").unwrap(), rate),
            Some(Decimal::from_str("0.02").unwrap())
        );
    }

    #[test]
    fn test_empty_image_reference_has_no_url() {
        assert_eq!(image_url(Some("")), None);
        assert_eq!(image_url(None), None);
    }

    #[test]
    fn test_filter_from_input() {
        let input = ListAdsInput {
            ad_type: Some("RENT".to_string()),
            city: Some("Recife".to_string()),
            min_price: Some(Decimal::from(10)),
            ..ListAdsInput::default()
        };
        let filter = AdsFilter::try_from(&input).unwrap();
        assert_eq!(filter.ad_type, Some(AdType::Rent));
        assert_eq!(filter.city.as_deref(), Some("Recife"));
        assert!(filter.state.is_none());
    }

    #[test]
    fn test_filter_bounds_are_inclusive() {
        let filter = AdsFilter {
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(100)),
            ..AdsFilter::default()
        };
        assert!(filter.matches(&ad("100", None)));
        assert!(!filter.matches(&ad("100.01", None)));
        assert!(!filter.matches(&ad("99.99", None)));
    }
}
