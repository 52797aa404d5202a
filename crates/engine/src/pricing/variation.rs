//! Per-variant signed price adjustments.

use rust_decimal::Decimal;

/// Add a signed variant delta to `price` (missing delta counts as zero).
#[must_use]
pub fn apply_variation_adjustment(price: Decimal, adjustment: Option<Decimal>) -> Decimal {
    price + adjustment.unwrap_or_default()
}

/// Sum signed variant deltas, treating missing entries as zero.
///
/// Accepts plain `Decimal`s as well as `Option<Decimal>`s.
#[must_use]
pub fn sum_variation_adjustments<I>(adjustments: I) -> Decimal
where
    I: IntoIterator,
    I::Item: Into<Option<Decimal>>,
{
    adjustments
        .into_iter()
        .map(|adjustment| adjustment.into().unwrap_or_default())
        .sum()
}
