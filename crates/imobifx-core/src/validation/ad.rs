use rust_decimal::Decimal;

use crate::constants::{PRICE_BRL_INTEGER_DIGITS, PRICE_BRL_SCALE};
use crate::error::{AppError, Violations};
use crate::models::{AdType, CreateAdInput, NewAd};

use super::cep::canonical_cep;
use super::{
    normalize_state, numeric_column_violation, NON_NEGATIVE_MESSAGE, STATE_MESSAGE, TYPE_MESSAGE,
};

fn required(violations: &mut Violations, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        violations.push(field, "required");
    }
    value.to_string()
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validate an ad draft and return its normalized form.
///
/// The returned `NewAd` carries the canonical CEP, trimmed text fields and
/// an uppercased state. Its image reference is left empty.
pub fn validate_create_ad_input(input: &CreateAdInput) -> Result<NewAd, AppError> {
    let mut violations = Violations::new();

    let ad_type = input.ad_type.trim().to_ascii_uppercase().parse::<AdType>().ok();
    if ad_type.is_none() {
        violations.push("type", TYPE_MESSAGE);
    }

    if input.price_brl < Decimal::ZERO {
        violations.push("price_brl", NON_NEGATIVE_MESSAGE);
    } else if let Some(message) =
        numeric_column_violation(input.price_brl, PRICE_BRL_INTEGER_DIGITS, PRICE_BRL_SCALE)
    {
        violations.push("price_brl", &message);
    }

    let cep = canonical_cep(&input.cep);
    if cep.is_none() {
        violations.push("cep", "must have 8 digits");
    }

    let street = required(&mut violations, "street", &input.street);
    let neighborhood = required(&mut violations, "neighborhood", &input.neighborhood);
    let city = required(&mut violations, "city", &input.city);

    let state = normalize_state(&input.state);
    if state.is_none() {
        violations.push("state", STATE_MESSAGE);
    }

    match (ad_type, cep, state) {
        (Some(ad_type), Some(cep), Some(state)) if violations.is_empty() => Ok(NewAd {
            ad_type,
            price_brl: input.price_brl,
            image_path: None,
            cep,
            street,
            number: optional(input.number.as_deref()),
            complement: optional(input.complement.as_deref()),
            neighborhood,
            city,
            state,
        }),
        _ => Err(violations.into_error()),
    }
}
