//! Input-contract and result-invariant checks.
//!
//! The calculators assume valid input and never fail. Callers run
//! [`validate_price_input`] before computing; [`validate_price_result`]
//! audits a finished record.

use rust_decimal::Decimal;
use thiserror::Error;

use pazar_core::{CustomerType, round2};

use super::composer::PriceCalculationInput;
use super::regional::{
    MAX_REGIONAL_MULTIPLIER, MIN_REGIONAL_MULTIPLIER, is_valid_regional_multiplier,
};
use super::PriceCalculationResult;

/// Largest supplier price or variation delta accepted: 1 trillion lira.
///
/// Keeps every product of a validated input (multiplier up to 2.0, rates up to
/// 1.0, quantities up to `u32::MAX`) inside `Decimal`'s range.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Rejected price calculation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceInputError {
    #[error("supplier price cannot be negative: {0}")]
    NegativeSupplierPrice(Decimal),

    #[error("supplier price {0} exceeds the maximum of {max}", max = MAX_MONEY_AMOUNT)]
    SupplierPriceTooLarge(Decimal),

    #[error("variation adjustment {0} exceeds the maximum of ±{max}", max = MAX_MONEY_AMOUNT)]
    VariationAdjustmentTooLarge(Decimal),

    #[error(
        "regional multiplier {0} is outside [{min}, {max}]",
        min = MIN_REGIONAL_MULTIPLIER,
        max = MAX_REGIONAL_MULTIPLIER
    )]
    InvalidRegionalMultiplier(Decimal),

    #[error("{customer_type} commission rate must be between 0 and 1, got {rate}")]
    InvalidCommissionRate {
        customer_type: CustomerType,
        rate: Decimal,
    },
}

/// Check a calculation input against the pricing contract.
///
/// # Errors
///
/// Returns the first violated rule: negative supplier price, a supplier
/// price or variation delta beyond [`MAX_MONEY_AMOUNT`], regional multiplier
/// outside `[0.5, 2.0]`, or a commission override outside `[0, 1]`.
pub fn validate_price_input(input: &PriceCalculationInput) -> Result<(), PriceInputError> {
    if input.supplier_price.is_sign_negative() && !input.supplier_price.is_zero() {
        return Err(PriceInputError::NegativeSupplierPrice(input.supplier_price));
    }
    if input.supplier_price > MAX_MONEY_AMOUNT {
        return Err(PriceInputError::SupplierPriceTooLarge(input.supplier_price));
    }
    if let Some(adjustment) = input
        .variation_adjustments
        .iter()
        .find(|adjustment| adjustment.abs() > MAX_MONEY_AMOUNT)
    {
        return Err(PriceInputError::VariationAdjustmentTooLarge(*adjustment));
    }

    if let Some(multiplier) = input.regional_multiplier
        && !is_valid_regional_multiplier(multiplier)
    {
        return Err(PriceInputError::InvalidRegionalMultiplier(multiplier));
    }

    if let Some(overrides) = &input.commission_overrides {
        let rates = [
            (CustomerType::B2b, overrides.b2b_rate),
            (CustomerType::B2c, overrides.b2c_rate),
        ];
        for (customer_type, rate) in rates {
            if let Some(rate) = rate
                && !is_valid_commission_rate(rate)
            {
                return Err(PriceInputError::InvalidCommissionRate {
                    customer_type,
                    rate,
                });
            }
        }
    }

    Ok(())
}

/// Whether `rate` lies in `[0, 1]`.
#[must_use]
pub fn is_valid_commission_rate(rate: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE).contains(&rate)
}

/// A broken invariant on a [`PriceCalculationResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceInvariantViolation {
    #[error("supplier price cannot be negative")]
    NegativeSupplierPrice,
    #[error("final price cannot be negative")]
    NegativeFinalPrice,
    #[error("commission amount cannot be negative")]
    NegativeCommissionAmount,
    #[error("commission rate must be between 0 and 1")]
    CommissionRateOutOfRange,
    #[error("regional multiplier must be positive")]
    NonPositiveMultiplier,
    #[error("base price {actual} does not match expected {expected}")]
    BasePriceMismatch { expected: Decimal, actual: Decimal },
    #[error("final price {actual} does not match expected {expected}")]
    FinalPriceMismatch { expected: Decimal, actual: Decimal },
}

/// Audit a price record. An empty list means every invariant holds.
#[must_use]
pub fn validate_price_result(result: &PriceCalculationResult) -> Vec<PriceInvariantViolation> {
    let mut violations = Vec::new();

    if result.supplier_price < Decimal::ZERO {
        violations.push(PriceInvariantViolation::NegativeSupplierPrice);
    }
    if result.final_price < Decimal::ZERO {
        violations.push(PriceInvariantViolation::NegativeFinalPrice);
    }
    if result.commission_amount < Decimal::ZERO {
        violations.push(PriceInvariantViolation::NegativeCommissionAmount);
    }
    if !is_valid_commission_rate(result.commission_rate) {
        violations.push(PriceInvariantViolation::CommissionRateOutOfRange);
    }
    if result.regional_multiplier <= Decimal::ZERO {
        violations.push(PriceInvariantViolation::NonPositiveMultiplier);
    }

    let expected_base =
        round2(result.supplier_price * result.regional_multiplier + result.variation_adjustment);
    if result.base_price != expected_base {
        violations.push(PriceInvariantViolation::BasePriceMismatch {
            expected: expected_base,
            actual: result.base_price,
        });
    }

    let expected_final = round2(result.base_price * (Decimal::ONE + result.commission_rate));
    if result.final_price != expected_final {
        violations.push(PriceInvariantViolation::FinalPriceMismatch {
            expected: expected_final,
            actual: result.final_price,
        });
    }

    violations
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use pazar_core::{Availability, ProductId, SupplierId, SupplierProductId};

    use super::*;
    use crate::pricing::{
        CommissionOverrides, SupplierProduct, build_price_result, calculate_customer_price,
    };

    fn result_for(price: Decimal, adjustments: &[Decimal]) -> PriceCalculationResult {
        let sp = SupplierProduct {
            id: SupplierProductId::new_v4(),
            supplier_id: SupplierId::new_v4(),
            supplier_name: "Anadolu Gıda".to_string(),
            price,
            stock_quantity: 4,
            availability: Availability::Limited,
            min_order_quantity: 1,
            is_featured: false,
        };
        build_price_result(
            ProductId::new_v4(),
            None,
            CustomerType::B2b,
            &sp,
            Some(dec!(1.2)),
            adjustments,
            None,
        )
    }

    #[test]
    fn test_valid_input_passes() {
        let input = PriceCalculationInput::new(dec!(0), CustomerType::B2c)
            .with_regional_multiplier(dec!(2.0))
            .with_commission_overrides(CommissionOverrides {
                b2b_rate: Some(dec!(0)),
                b2c_rate: Some(dec!(1)),
            });
        assert_eq!(validate_price_input(&input), Ok(()));
    }

    #[test]
    fn test_negative_supplier_price_rejected() {
        let input = PriceCalculationInput::new(dec!(-0.01), CustomerType::B2c);
        assert_eq!(
            validate_price_input(&input),
            Err(PriceInputError::NegativeSupplierPrice(dec!(-0.01)))
        );
    }

    #[test]
    fn test_multiplier_out_of_band_rejected() {
        let input =
            PriceCalculationInput::new(dec!(10), CustomerType::B2b).with_regional_multiplier(dec!(2.5));
        assert_eq!(
            validate_price_input(&input),
            Err(PriceInputError::InvalidRegionalMultiplier(dec!(2.5)))
        );
    }

    #[test]
    fn test_commission_override_out_of_range_rejected() {
        let input = PriceCalculationInput::new(dec!(10), CustomerType::B2b).with_commission_overrides(
            CommissionOverrides {
                b2b_rate: None,
                b2c_rate: Some(dec!(1.5)),
            },
        );
        assert!(matches!(
            validate_price_input(&input),
            Err(PriceInputError::InvalidCommissionRate {
                customer_type: CustomerType::B2c,
                ..
            })
        ));
    }

    #[test]
    fn test_money_ceiling_is_one_trillion() {
        assert_eq!(MAX_MONEY_AMOUNT, dec!(1_000_000_000_000));
    }

    #[test]
    fn test_oversized_supplier_price_rejected() {
        let input = PriceCalculationInput::new(Decimal::MAX, CustomerType::B2c)
            .with_regional_multiplier(dec!(2));
        assert_eq!(
            validate_price_input(&input),
            Err(PriceInputError::SupplierPriceTooLarge(Decimal::MAX))
        );

        let just_over = PriceCalculationInput::new(MAX_MONEY_AMOUNT + dec!(0.01), CustomerType::B2b);
        assert!(matches!(
            validate_price_input(&just_over),
            Err(PriceInputError::SupplierPriceTooLarge(_))
        ));
    }

    #[test]
    fn test_oversized_adjustment_rejected() {
        let input = PriceCalculationInput::new(dec!(10), CustomerType::B2c)
            .with_variation_adjustments(vec![dec!(5), -Decimal::MAX]);
        assert_eq!(
            validate_price_input(&input),
            Err(PriceInputError::VariationAdjustmentTooLarge(-Decimal::MAX))
        );
    }

    #[test]
    fn test_price_at_ceiling_computes_without_overflow() {
        let input = PriceCalculationInput::new(MAX_MONEY_AMOUNT, CustomerType::B2c)
            .with_regional_multiplier(dec!(2))
            .with_variation_adjustments(vec![MAX_MONEY_AMOUNT])
            .with_commission_overrides(CommissionOverrides {
                b2b_rate: None,
                b2c_rate: Some(dec!(1)),
            });
        assert_eq!(validate_price_input(&input), Ok(()));

        let final_price = calculate_customer_price(&input);
        assert_eq!(final_price, dec!(6_000_000_000_000));
        // A full u32 quantity still fits.
        assert!(final_price.checked_mul(Decimal::from(u32::MAX)).is_some());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PriceInputError::InvalidRegionalMultiplier(dec!(3)).to_string(),
            "regional multiplier 3 is outside [0.5, 2.0]"
        );
    }

    #[test]
    fn test_computed_result_has_no_violations() {
        assert!(validate_price_result(&result_for(dec!(42.42), &[dec!(1.5)])).is_empty());
    }

    #[test]
    fn test_negative_adjustment_flags_final_price() {
        let result = result_for(dec!(10), &[dec!(-50)]);
        let violations = validate_price_result(&result);
        assert!(violations.contains(&PriceInvariantViolation::NegativeFinalPrice));
        assert!(violations.contains(&PriceInvariantViolation::NegativeCommissionAmount));
    }

    #[test]
    fn test_tampered_result_flags_mismatch() {
        let mut result = result_for(dec!(10), &[]);
        result.final_price += dec!(1);
        assert!(matches!(
            validate_price_result(&result).as_slice(),
            [PriceInvariantViolation::FinalPriceMismatch { .. }]
        ));
    }
}
