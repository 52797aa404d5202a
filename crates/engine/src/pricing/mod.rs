//! Price computation.
//!
//! Pure, synchronous functions over [`rust_decimal::Decimal`]: commission
//! selection, regional scaling, variant deltas and the composer that chains
//! them into a [`PriceCalculationResult`].

pub mod commission;
pub mod composer;
pub mod display;
pub mod regional;
pub mod validation;
pub mod variation;

pub use commission::{
    CommissionOverrides, CommissionRates, DEFAULT_B2B_RATE, DEFAULT_B2C_RATE,
    calculate_commission, calculate_price_with_commission, get_commission_rate,
};
pub use composer::{
    CartPriceLine, PriceCalculationInput, PriceCalculationResult, SupplierProduct,
    build_price_result, calculate_base_price, calculate_cart_item_price, calculate_cart_total,
    calculate_customer_price,
};
pub use display::{PriceChange, PriceDirection, format_price_change};
pub use regional::{
    MAX_REGIONAL_MULTIPLIER, MIN_REGIONAL_MULTIPLIER, apply_regional_multiplier,
    get_default_regional_multiplier, is_valid_regional_multiplier,
};
pub use validation::{
    MAX_MONEY_AMOUNT, PriceInputError, PriceInvariantViolation, is_valid_commission_rate,
    validate_price_input, validate_price_result,
};
pub use variation::{apply_variation_adjustment, sum_variation_adjustments};
