//! Shopping cart model.
//!
//! The cart is plain data passed in by the caller. Nothing here reads
//! session or region state on its own.

pub mod region;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pazar_core::{ProductId, RegionId, SupplierId, SupplierProductId, VariantId, round2};

pub use region::{
    CartValidationResult, InvalidCartItem, RepricedCartItem, apply_cart_region_change,
    validate_cart_for_region,
};

/// Where a cart item's frozen price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    #[default]
    Region,
    Supplier,
    Product,
}

/// Selected packaging/size variant of a cart item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedVariant {
    pub id: VariantId,
    pub label: String,
    /// Scales the region unit price (e.g. `2.9` for a 3 kg pack).
    pub price_multiplier: Decimal,
}

/// One line of a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Region price frozen when the item was added, without the variant
    /// multiplier.
    pub unit_price_at_add: Decimal,
    pub region_id_at_add: RegionId,
    #[serde(default)]
    pub selected_variant: Option<SelectedVariant>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(default)]
    pub supplier_product_id: Option<SupplierProductId>,
    #[serde(default)]
    pub supplier_name: String,
    #[serde(default)]
    pub price_source: PriceSource,
}

impl CartItem {
    /// Unit price including the variant multiplier, unrounded.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        let multiplier = self
            .selected_variant
            .as_ref()
            .map_or(Decimal::ONE, |variant| variant.price_multiplier);
        self.unit_price_at_add * multiplier
    }

    /// `round2(unit_price * quantity)`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round2(self.unit_price() * Decimal::from(self.quantity))
    }
}

/// Sum of line totals.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

/// Total number of units in the cart.
#[must_use]
pub fn cart_item_count(items: &[CartItem]) -> u32 {
    items.iter().map(|item| item.quantity).sum()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn item(price: Decimal, quantity: u32, variant: Option<Decimal>) -> CartItem {
        CartItem {
            product_id: ProductId::new_v4(),
            product_name: "Domates".to_string(),
            quantity,
            unit_price_at_add: price,
            region_id_at_add: RegionId::new_v4(),
            selected_variant: variant.map(|price_multiplier| SelectedVariant {
                id: VariantId::new_v4(),
                label: "3 kg".to_string(),
                price_multiplier,
            }),
            supplier_id: None,
            supplier_product_id: None,
            supplier_name: String::new(),
            price_source: PriceSource::Region,
        }
    }

    #[test]
    fn test_line_total_without_variant() {
        assert_eq!(item(dec!(12.5), 4, None).line_total(), dec!(50));
    }

    #[test]
    fn test_line_total_applies_variant_multiplier() {
        let line = item(dec!(10), 2, Some(dec!(2.9)));
        assert_eq!(line.unit_price(), dec!(29));
        assert_eq!(line.line_total(), dec!(58));
    }

    #[test]
    fn test_cart_total_and_count() {
        let items = vec![item(dec!(10), 1, None), item(dec!(3.333), 3, None)];
        assert_eq!(cart_total(&items), dec!(20));
        assert_eq!(cart_item_count(&items), 4);
        assert_eq!(cart_total(&[]), dec!(0));
    }
}
