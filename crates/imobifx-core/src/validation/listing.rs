use rust_decimal::Decimal;

use crate::constants::MAX_PAGE_SIZE;
use crate::error::{AppError, Violations};
use crate::models::{AdType, ListAdsInput};

use super::{normalize_state, NON_NEGATIVE_MESSAGE, STATE_MESSAGE, TYPE_MESSAGE};

const PAGE_TOO_LARGE_MESSAGE: &str = "is too large for page_size";

pub fn validate_list_ads_input(input: &ListAdsInput) -> Result<(), AppError> {
    let mut violations = Violations::new();

    if input.page < 1 {
        violations.push("page", "must be >= 1");
    } else if (input.page - 1).checked_mul(input.page_size.max(1)).is_none() {
        violations.push("page", PAGE_TOO_LARGE_MESSAGE);
    }
    if !(1..=MAX_PAGE_SIZE).contains(&input.page_size) {
        violations.push("page_size", "must be between 1 and 50");
    }
    if let Some(ad_type) = input.ad_type.as_deref() {
        if ad_type.parse::<AdType>().is_err() {
            violations.push("type", TYPE_MESSAGE);
        }
    }
    if let Some(state) = input.state.as_deref() {
        if normalize_state(state).is_none() {
            violations.push("state", STATE_MESSAGE);
        }
    }
    if input.min_price.is_some_and(|min| min < Decimal::ZERO) {
        violations.push("min_price", NON_NEGATIVE_MESSAGE);
    }
    if input.max_price.is_some_and(|max| max < Decimal::ZERO) {
        violations.push("max_price", NON_NEGATIVE_MESSAGE);
    }
    if let (Some(min), Some(max)) = (input.min_price, input.max_price) {
        if min > max {
            violations.push("price_range", "min_price must be <= max_price");
        }
    }

    violations.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_list_ads_input(&ListAdsInput::default()).is_ok());
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let input = ListAdsInput {
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(50)),
            ..ListAdsInput::default()
        };
        let err = validate_list_ads_input(&input).unwrap_err();
        assert_eq!(err.violations()[0].field, "price_range");
    }

    #[test]
    fn test_equal_bounds_are_valid() {
        let input = ListAdsInput {
            min_price: Some(Decimal::from(100)),
            max_price: Some(Decimal::from(100)),
            ..ListAdsInput::default()
        };
        assert!(validate_list_ads_input(&input).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let input = ListAdsInput {
            page: 0,
            page_size: 51,
            ad_type: Some("LEASE".to_string()),
            city: Some("Recife".to_string()),
            state: Some("PER".to_string()),
            min_price: Some(Decimal::from(-1)),
            max_price: Some(Decimal::from(-2)),
        };
        let err = validate_list_ads_input(&input).unwrap_err();
        let fields: Vec<&str> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(
            fields,
            ["page", "page_size", "type", "state", "min_price", "max_price", "price_range"]
        );
    }

    #[test]
    fn test_page_past_i64_offset_is_rejected() {
        let input = ListAdsInput {
            page: i64::MAX,
            page_size: 50,
            ..ListAdsInput::default()
        };
        let err = validate_list_ads_input(&input).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].field, "page");
        assert_eq!(err.violations()[0].message, PAGE_TOO_LARGE_MESSAGE);

        let single = ListAdsInput {
            page: i64::MAX,
            page_size: 1,
            ..ListAdsInput::default()
        };
        assert!(validate_list_ads_input(&single).is_ok());
    }

    #[test]
    fn test_page_size_bounds() {
        for (page_size, ok) in [(0, false), (1, true), (50, true), (51, false)] {
            let input = ListAdsInput {
                page_size,
                ..ListAdsInput::default()
            };
            assert_eq!(validate_list_ads_input(&input).is_ok(), ok, "{page_size}");
        }
    }
}
