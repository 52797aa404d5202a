//! Cart revalidation when the shopping region changes.
//!
//! [`validate_cart_for_region`] only computes a change-set. Applying it is a
//! separate, explicit call to [`apply_cart_region_change`], so the caller can
//! ask the customer to confirm in between.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use pazar_core::{ProductId, RegionId};

use super::CartItem;
use crate::catalog::{CatalogError, CatalogSource, RegionProduct, UnavailableReason};

/// A cart item that cannot be bought in the new region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidCartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub reason: UnavailableReason,
}

/// A cart item whose frozen price differs from the new region's price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepricedCartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub old_price: Decimal,
    pub new_price: Decimal,
}

/// Change-set produced by a region revalidation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartValidationResult {
    pub invalid_items: Vec<InvalidCartItem>,
    pub reprice_items: Vec<RepricedCartItem>,
    pub has_changes: bool,
}

impl CartValidationResult {
    fn new(invalid_items: Vec<InvalidCartItem>, reprice_items: Vec<RepricedCartItem>) -> Self {
        let has_changes = !invalid_items.is_empty() || !reprice_items.is_empty();
        Self {
            invalid_items,
            reprice_items,
            has_changes,
        }
    }
}

/// Check every cart item against `new_region_id`.
///
/// Issues a single batched region-product read. An item is invalid when the
/// region has no offer for it, the offer is inactive, or it has no stock;
/// otherwise it is repriced when the region price differs from the price
/// frozen at add time. The previous region's price is never consulted.
///
/// # Errors
///
/// Returns the catalog error unchanged if the region-product read fails.
#[instrument(skip(catalog, items), fields(region_id = %new_region_id, items = items.len()))]
pub async fn validate_cart_for_region<C: CatalogSource>(
    catalog: &C,
    items: &[CartItem],
    new_region_id: RegionId,
) -> Result<CartValidationResult, CatalogError> {
    if items.is_empty() {
        return Ok(CartValidationResult::default());
    }

    let mut seen = HashSet::new();
    let product_ids: Vec<ProductId> = items
        .iter()
        .map(|item| item.product_id)
        .filter(|id| seen.insert(*id))
        .collect();

    let offers: HashMap<ProductId, RegionProduct> = catalog
        .region_products(new_region_id, &product_ids)
        .await?
        .into_iter()
        .map(|offer| (offer.product_id, offer))
        .collect();

    let mut invalid_items = Vec::new();
    let mut reprice_items = Vec::new();

    for item in items {
        let offer = offers.get(&item.product_id);
        let reason = offer.map_or(
            Some(UnavailableReason::NotInRegion),
            RegionProduct::unavailable_reason,
        );

        if let Some(reason) = reason {
            debug!(product_id = %item.product_id, ?reason, "Cart item invalid in region");
            invalid_items.push(InvalidCartItem {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                reason,
            });
            continue;
        }

        if let Some(offer) = offer
            && offer.price != item.unit_price_at_add
        {
            debug!(
                product_id = %item.product_id,
                old_price = %item.unit_price_at_add,
                new_price = %offer.price,
                "Cart item needs repricing"
            );
            reprice_items.push(RepricedCartItem {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                old_price: item.unit_price_at_add,
                new_price: offer.price,
            });
        }
    }

    let result = CartValidationResult::new(invalid_items, reprice_items);
    info!(
        invalid = result.invalid_items.len(),
        repriced = result.reprice_items.len(),
        "Cart revalidated for region"
    );
    Ok(result)
}

/// Apply a change-set, returning the new cart.
///
/// Invalid items are dropped, repriced items take their new price, and every
/// surviving item is stamped with `new_region_id`. The input is not modified.
#[must_use]
pub fn apply_cart_region_change(
    items: &[CartItem],
    new_region_id: RegionId,
    result: &CartValidationResult,
) -> Vec<CartItem> {
    let invalid: HashSet<ProductId> = result
        .invalid_items
        .iter()
        .map(|item| item.product_id)
        .collect();
    let new_prices: HashMap<ProductId, Decimal> = result
        .reprice_items
        .iter()
        .map(|item| (item.product_id, item.new_price))
        .collect();

    items
        .iter()
        .filter(|item| !invalid.contains(&item.product_id))
        .map(|item| CartItem {
            unit_price_at_add: new_prices
                .get(&item.product_id)
                .copied()
                .unwrap_or(item.unit_price_at_add),
            region_id_at_add: new_region_id,
            ..item.clone()
        })
        .collect()
}
