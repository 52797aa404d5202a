//! Commission rates per customer class.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pazar_core::{CustomerType, round2};

/// Default business commission: 30%.
pub const DEFAULT_B2B_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
/// Default consumer commission: 50%.
pub const DEFAULT_B2C_RATE: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

/// A complete pair of commission rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub b2b_rate: Decimal,
    pub b2c_rate: Decimal,
}

impl Default for CommissionRates {
    fn default() -> Self {
        Self {
            b2b_rate: DEFAULT_B2B_RATE,
            b2c_rate: DEFAULT_B2C_RATE,
        }
    }
}

impl CommissionRates {
    /// Default rates with any provided override applied on top.
    #[must_use]
    pub fn with_overrides(overrides: Option<&CommissionOverrides>) -> Self {
        let defaults = Self::default();
        let Some(overrides) = overrides else {
            return defaults;
        };
        Self {
            b2b_rate: overrides.b2b_rate.unwrap_or(defaults.b2b_rate),
            b2c_rate: overrides.b2c_rate.unwrap_or(defaults.b2c_rate),
        }
    }

    /// Rate for one customer class.
    #[must_use]
    pub const fn rate_for(&self, customer_type: CustomerType) -> Decimal {
        match customer_type {
            CustomerType::B2b => self.b2b_rate,
            CustomerType::B2c => self.b2c_rate,
        }
    }
}

/// Partial commission overrides; unset fields fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommissionOverrides {
    #[serde(default)]
    pub b2b_rate: Option<Decimal>,
    #[serde(default)]
    pub b2c_rate: Option<Decimal>,
}

/// Commission rate for a customer class.
#[must_use]
pub fn get_commission_rate(
    customer_type: CustomerType,
    overrides: Option<&CommissionOverrides>,
) -> Decimal {
    CommissionRates::with_overrides(overrides).rate_for(customer_type)
}

/// Commission amount on `base_price`, unrounded.
#[must_use]
pub fn calculate_commission(
    base_price: Decimal,
    customer_type: CustomerType,
    overrides: Option<&CommissionOverrides>,
) -> Decimal {
    base_price * get_commission_rate(customer_type, overrides)
}

/// `base_price` with commission added, rounded to 2 dp.
#[must_use]
pub fn calculate_price_with_commission(
    base_price: Decimal,
    customer_type: CustomerType,
    overrides: Option<&CommissionOverrides>,
) -> Decimal {
    let rate = get_commission_rate(customer_type, overrides);
    round2(base_price * (Decimal::ONE + rate))
}
