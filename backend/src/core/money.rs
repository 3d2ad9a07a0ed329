//! Money handling
//!
//! All monetary values are `Decimal`. Equality on costs is exact, so
//! min/max tie detection is reproducible. Rounding only happens at display.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as currency with two decimals and thousands separators
///
/// Uses banker's rounding. Negative amounts render as `-$5.00`.
///
/// # Example
/// ```
/// use rma_calculator_core_rs::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456789, 2)), "$1,234,567.89");
/// assert_eq!(format_currency(Decimal::new(-5, 0)), "-$5.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let text = magnitude.to_string();

    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}.{}", grouped, frac)
    } else {
        format!("${}.{}", grouped, frac)
    }
}

/// Parse a numeric cell that may carry currency formatting
///
/// Accepts plain decimals (`12.5`) and currency text (`$1,234.50`).
/// Returns `None` for anything that is not a number after stripping
/// `$`, `,` and surrounding whitespace.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
