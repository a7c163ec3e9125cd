pub mod addresses;
pub mod ads;
pub mod health;
pub mod quotes;

use std::str::FromStr;

use rust_decimal::Decimal;

/// Message for numeric form fields that do not parse.
const NUMBER_MESSAGE: &str = "must be a number";

/// Plain or scientific decimal notation.
fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Trimmed value, `None` when blank.
fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
