use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::constants::{RATE_INTEGER_DIGITS, RATE_SCALE};
use crate::error::{AppError, Violations};
use crate::models::CreateQuoteInput;

use super::numeric_column_violation;

/// Check the rate and parse the optional RFC 3339 effective-at.
///
/// An absent or blank effective-at yields `Ok(None)`.
pub fn validate_create_quote_input(
    input: &CreateQuoteInput,
) -> Result<Option<DateTime<FixedOffset>>, AppError> {
    let mut violations = Violations::new();

    if input.brl_to_usd <= Decimal::ZERO {
        violations.push("brl_to_usd", "must be > 0");
    } else if let Some(message) =
        numeric_column_violation(input.brl_to_usd, RATE_INTEGER_DIGITS, RATE_SCALE)
    {
        violations.push("brl_to_usd", &message);
    }

    let effective_at = match input.effective_at.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(at) => Some(at),
            Err(_) => {
                violations.push("effective_at", "must be RFC3339 (e.g. 2026-02-16T10:00:00Z)");
                None
            }
        },
    };

    violations.into_result()?;
    Ok(effective_at)
}
