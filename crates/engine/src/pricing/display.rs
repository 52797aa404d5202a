//! Price-change presentation helpers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pazar_core::{format_percentage, round2};

/// Direction of a price movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceDirection {
    Increased,
    Decreased,
    Stable,
}

/// A price movement, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceChange {
    pub direction: PriceDirection,
    /// Signed change in percent, 2 dp. `None` when there is no previous price.
    pub percentage: Option<Decimal>,
    pub label: String,
}

/// Describe the move from `previous` to `current`.
///
/// A missing or zero previous price is reported as a new, stable price.
#[must_use]
pub fn format_price_change(current: Decimal, previous: Option<Decimal>) -> PriceChange {
    let Some(previous) = previous.filter(|p| !p.is_zero()) else {
        return PriceChange {
            direction: PriceDirection::Stable,
            percentage: None,
            label: "Yeni fiyat".to_string(),
        };
    };

    let percentage = (current - previous) / previous * Decimal::ONE_HUNDRED;
    let (direction, label) = match percentage.cmp(&Decimal::ZERO) {
        std::cmp::Ordering::Greater => (
            PriceDirection::Increased,
            format!("%{} artış", format_percentage(percentage)),
        ),
        std::cmp::Ordering::Less => (
            PriceDirection::Decreased,
            format!("%{} düşüş", format_percentage(percentage.abs())),
        ),
        std::cmp::Ordering::Equal => (PriceDirection::Stable, "Değişmedi".to_string()),
    };

    PriceChange {
        direction,
        percentage: Some(round2(percentage)),
        label,
    }
}
