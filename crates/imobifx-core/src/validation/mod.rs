//! Input validation
//!
//! Pure checks over caller-supplied drafts. Every function collects all
//! violations before failing, and none of them mutate their input: the
//! create-ad check hands back a normalized copy instead.

mod ad;
mod cep;
mod image;
mod listing;
mod quote;

pub use ad::validate_create_ad_input;
pub use cep::{canonical_cep, format_cep, normalize_cep};
pub use image::validate_image;
pub use listing::validate_list_ads_input;
pub use quote::validate_create_quote_input;

use rust_decimal::Decimal;

/// Trimmed, uppercased state code if it is exactly two ASCII letters.
pub(crate) fn normalize_state(raw: &str) -> Option<String> {
    let state = raw.trim();
    (state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic()))
        .then(|| state.to_ascii_uppercase())
}

/// Message for a value that a `NUMERIC` column with `integer_digits` before
/// the point and `scale` after it would reject or round.
pub(crate) fn numeric_column_violation(
    value: Decimal,
    integer_digits: u32,
    scale: u32,
) -> Option<String> {
    let bound = Decimal::from(10_u64.pow(integer_digits));
    if value.abs() >= bound {
        Some(format!("must be less than {bound}"))
    } else if value.normalize().scale() > scale {
        Some(format!("must have at most {scale} decimal places"))
    } else {
        None
    }
}

pub(crate) const STATE_MESSAGE: &str = "must have 2 letters (UF)";
pub(crate) const TYPE_MESSAGE: &str = "must be SALE or RENT";
pub(crate) const NON_NEGATIVE_MESSAGE: &str = "must be >= 0";
