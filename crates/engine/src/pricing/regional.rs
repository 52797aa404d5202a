//! Regional price multipliers.
//!
//! Applying a multiplier and deciding whether a multiplier is acceptable are
//! separate operations: the catalog tooling validates, the composer applies.

use rust_decimal::Decimal;

/// Smallest multiplier a region may be configured with.
pub const MIN_REGIONAL_MULTIPLIER: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Largest multiplier a region may be configured with.
pub const MAX_REGIONAL_MULTIPLIER: Decimal = Decimal::from_parts(20, 0, 0, false, 1);

/// Multiplier used when a region has none configured.
#[must_use]
pub const fn get_default_regional_multiplier() -> Decimal {
    Decimal::ONE
}

/// Scale `price` by `multiplier` (1.0 when absent). Unrounded.
#[must_use]
pub fn apply_regional_multiplier(price: Decimal, multiplier: Option<Decimal>) -> Decimal {
    price * multiplier.unwrap_or_else(get_default_regional_multiplier)
}

/// Whether `multiplier` lies in the configurable band `[0.5, 2.0]`.
#[must_use]
pub fn is_valid_regional_multiplier(multiplier: Decimal) -> bool {
    (MIN_REGIONAL_MULTIPLIER..=MAX_REGIONAL_MULTIPLIER).contains(&multiplier)
}
