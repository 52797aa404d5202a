//! Price quote command.

use rust_decimal::Decimal;
use tracing::info;

use pazar_core::{CustomerType, format_commission_rate, format_price};
use pazar_engine::EngineConfig;
use pazar_engine::pricing::{
    PriceCalculationInput, calculate_base_price, calculate_customer_price, format_price_change,
    validate_price_input,
};

/// Compute and report a customer price.
///
/// Commission overrides and the fallback regional multiplier come from
/// [`EngineConfig::from_env`].
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the inputs are out of
/// range.
pub fn run(
    supplier_price: Decimal,
    customer_type: CustomerType,
    multiplier: Option<Decimal>,
    adjustments: Vec<Decimal>,
    previous: Option<Decimal>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let multiplier = multiplier.unwrap_or(config.default_regional_multiplier);

    let input = PriceCalculationInput::new(supplier_price, customer_type)
        .with_regional_multiplier(multiplier)
        .with_variation_adjustments(adjustments)
        .with_commission_overrides(config.commission);
    validate_price_input(&input)?;

    let rates = config.commission_rates();
    let base_price = calculate_base_price(
        input.supplier_price,
        input.regional_multiplier,
        &input.variation_adjustments,
    );
    let final_price = calculate_customer_price(&input);

    info!("Quote ({customer_type})");
    info!("  Supplier price: {}", format_price(supplier_price));
    info!("  Regional multiplier: {multiplier}");
    info!("  Base price: {}", format_price(base_price));
    info!(
        "  Commission ({}): {}",
        format_commission_rate(rates.rate_for(customer_type)),
        format_price(final_price - base_price)
    );
    info!("  Final price: {}", format_price(final_price));

    let other = match customer_type {
        CustomerType::B2b => CustomerType::B2c,
        CustomerType::B2c => CustomerType::B2b,
    };
    let other_input = PriceCalculationInput {
        customer_type: other,
        ..input
    };
    info!(
        "  {other} price: {}",
        format_price(calculate_customer_price(&other_input))
    );

    if previous.is_some() {
        let change = format_price_change(final_price, previous);
        info!("  Change: {}", change.label);
    }

    Ok(())
}
