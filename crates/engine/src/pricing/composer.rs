//! Customer price composition.
//!
//! The order of operations is fixed:
//!
//! 1. scale the supplier price by the regional multiplier,
//! 2. add the summed variation deltas (this is the *base price*),
//! 3. apply the customer-class commission to the base price.
//!
//! Commission is always the last multiplicative step, so it is charged on the
//! logistics-adjusted cost ("markup" pricing).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pazar_core::{
    Availability, CustomerType, ProductId, RegionId, SupplierId, SupplierProductId, round2,
};

use super::commission::{
    CommissionOverrides, calculate_price_with_commission, get_commission_rate,
};
use super::regional::apply_regional_multiplier;
use super::variation::{apply_variation_adjustment, sum_variation_adjustments};

/// Inputs for a single customer price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCalculationInput {
    pub supplier_price: Decimal,
    pub customer_type: CustomerType,
    /// Defaults to 1.0 when absent.
    #[serde(default)]
    pub regional_multiplier: Option<Decimal>,
    #[serde(default)]
    pub variation_adjustments: Vec<Decimal>,
    #[serde(default)]
    pub commission_overrides: Option<CommissionOverrides>,
}

impl PriceCalculationInput {
    /// Input with no regional multiplier, adjustments or overrides.
    #[must_use]
    pub const fn new(supplier_price: Decimal, customer_type: CustomerType) -> Self {
        Self {
            supplier_price,
            customer_type,
            regional_multiplier: None,
            variation_adjustments: Vec::new(),
            commission_overrides: None,
        }
    }

    #[must_use]
    pub fn with_regional_multiplier(mut self, multiplier: Decimal) -> Self {
        self.regional_multiplier = Some(multiplier);
        self
    }

    #[must_use]
    pub fn with_variation_adjustments(mut self, adjustments: Vec<Decimal>) -> Self {
        self.variation_adjustments = adjustments;
        self
    }

    #[must_use]
    pub fn with_commission_overrides(mut self, overrides: CommissionOverrides) -> Self {
        self.commission_overrides = Some(overrides);
        self
    }
}

/// A supplier's offer for a product. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierProduct {
    pub id: SupplierProductId,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    /// Supplier's base price, before region, variant and commission.
    pub price: Decimal,
    pub stock_quantity: i32,
    pub availability: Availability,
    pub min_order_quantity: u32,
    #[serde(default)]
    pub is_featured: bool,
}

/// Audit record of a single price computation.
///
/// Invariants (see [`super::validate_price_result`]):
/// - `base_price == round2(supplier_price * regional_multiplier + variation_adjustment)`
/// - `final_price == round2(base_price * (1 + commission_rate))`
/// - `base_price + commission_amount == final_price`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCalculationResult {
    pub product_id: ProductId,
    pub region_id: Option<RegionId>,
    pub customer_type: CustomerType,

    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub supplier_product_id: SupplierProductId,

    pub supplier_price: Decimal,
    pub regional_multiplier: Decimal,
    pub variation_adjustment: Decimal,
    pub base_price: Decimal,
    pub commission_rate: Decimal,
    pub commission_amount: Decimal,
    pub final_price: Decimal,

    /// Same base price under business commission.
    pub b2b_price: Decimal,
    /// Same base price under consumer commission.
    pub b2c_price: Decimal,

    pub availability: Availability,
    pub stock_quantity: i32,
    pub is_available: bool,
    pub min_order_quantity: u32,
    pub is_featured: bool,
}

/// Base price: supplier price after regional scaling and variant deltas,
/// rounded to 2 dp.
#[must_use]
pub fn calculate_base_price(
    supplier_price: Decimal,
    regional_multiplier: Option<Decimal>,
    variation_adjustments: &[Decimal],
) -> Decimal {
    let scaled = apply_regional_multiplier(supplier_price, regional_multiplier);
    let adjustment = sum_variation_adjustments(variation_adjustments.iter().copied());
    round2(apply_variation_adjustment(scaled, Some(adjustment)))
}

/// Final customer-facing price for `input`.
#[must_use]
pub fn calculate_customer_price(input: &PriceCalculationInput) -> Decimal {
    let base_price = calculate_base_price(
        input.supplier_price,
        input.regional_multiplier,
        &input.variation_adjustments,
    );
    calculate_price_with_commission(
        base_price,
        input.customer_type,
        input.commission_overrides.as_ref(),
    )
}

/// Build the full audit record for one product/region/customer combination.
#[must_use]
pub fn build_price_result(
    product_id: ProductId,
    region_id: Option<RegionId>,
    customer_type: CustomerType,
    supplier_product: &SupplierProduct,
    regional_multiplier: Option<Decimal>,
    variation_adjustments: &[Decimal],
    overrides: Option<&CommissionOverrides>,
) -> PriceCalculationResult {
    let regional_multiplier = regional_multiplier.unwrap_or(Decimal::ONE);
    let variation_adjustment = sum_variation_adjustments(variation_adjustments.iter().copied());
    let base_price = calculate_base_price(
        supplier_product.price,
        Some(regional_multiplier),
        variation_adjustments,
    );

    let commission_rate = get_commission_rate(customer_type, overrides);
    let final_price = calculate_price_with_commission(base_price, customer_type, overrides);

    PriceCalculationResult {
        product_id,
        region_id,
        customer_type,
        supplier_id: supplier_product.supplier_id,
        supplier_name: supplier_product.supplier_name.clone(),
        supplier_product_id: supplier_product.id,
        supplier_price: supplier_product.price,
        regional_multiplier,
        variation_adjustment,
        base_price,
        commission_rate,
        commission_amount: final_price - base_price,
        final_price,
        b2b_price: calculate_price_with_commission(base_price, CustomerType::B2b, overrides),
        b2c_price: calculate_price_with_commission(base_price, CustomerType::B2c, overrides),
        availability: supplier_product.availability,
        stock_quantity: supplier_product.stock_quantity,
        is_available: supplier_product.stock_quantity > 0,
        min_order_quantity: supplier_product.min_order_quantity,
        is_featured: supplier_product.is_featured,
    }
}

/// A priced result with a quantity attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPriceLine {
    #[serde(flatten)]
    pub price: PriceCalculationResult,
    pub quantity: u32,
    /// `round2(final_price * quantity)`.
    pub total_price: Decimal,
}

/// Attach a quantity to a price result.
#[must_use]
pub fn calculate_cart_item_price(price: PriceCalculationResult, quantity: u32) -> CartPriceLine {
    let total_price = round2(price.final_price * Decimal::from(quantity));
    CartPriceLine {
        price,
        quantity,
        total_price,
    }
}

/// Sum of line totals.
#[must_use]
pub fn calculate_cart_total(lines: &[CartPriceLine]) -> Decimal {
    lines.iter().map(|line| line.total_price).sum()
}
