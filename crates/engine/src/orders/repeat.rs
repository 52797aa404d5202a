//! Repeat-order validation.
//!
//! Re-checks a past order's lines against the current catalog and region
//! state, classifies each as available or unavailable, and measures price
//! drift.
//!
//! `total_old_price` covers every original line while `total_new_price`
//! covers only the available ones, so `price_difference` mixes "price
//! changed" with "item dropped". Callers showing the difference should
//! present it alongside `unavailable_items`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use pazar_core::{ProductId, RegionId, round2};

use super::{Order, OrderItem};
use crate::cart::{CartItem, PriceSource};
use crate::catalog::{CatalogError, CatalogProduct, CatalogSource, RegionProduct, UnavailableReason};

/// An original line that can be ordered again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRepeatItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Current price for this customer.
    pub price: Decimal,
    /// Price charged on the original order.
    pub old_price: Decimal,
    pub price_changed: bool,
    /// Current region business price, if the region has one.
    pub business_price: Option<Decimal>,
}

/// An original line that cannot be ordered again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableRepeatItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub reason: UnavailableReason,
}

/// Outcome of a repeat-order validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatOrderValidationResult {
    /// True iff at least one line is available.
    pub can_repeat: bool,
    pub available_items: Vec<AvailableRepeatItem>,
    pub unavailable_items: Vec<UnavailableRepeatItem>,
    /// Σ old price × quantity over all original lines.
    pub total_old_price: Decimal,
    /// Σ current price × quantity over available lines.
    pub total_new_price: Decimal,
    /// `total_new_price - total_old_price`.
    pub price_difference: Decimal,
    pub price_increased: bool,
}

impl RepeatOrderValidationResult {
    /// Every line rejected because the order belongs to another region.
    #[must_use]
    pub fn region_changed(items: &[OrderItem]) -> Self {
        Self {
            can_repeat: false,
            available_items: Vec::new(),
            unavailable_items: items
                .iter()
                .map(|item| UnavailableRepeatItem {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    reason: UnavailableReason::RegionChanged,
                })
                .collect(),
            total_old_price: Decimal::ZERO,
            total_new_price: Decimal::ZERO,
            price_difference: Decimal::ZERO,
            price_increased: false,
        }
    }

    /// Number of original lines that will not be re-added.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.unavailable_items.len()
    }

    /// Cart lines for the available items, priced at the current price.
    #[must_use]
    pub fn cart_items(&self, region_id: RegionId) -> Vec<CartItem> {
        self.available_items
            .iter()
            .map(|item| CartItem {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price_at_add: item.price,
                region_id_at_add: region_id,
                selected_variant: None,
                supplier_id: None,
                supplier_product_id: None,
                supplier_name: String::new(),
                price_source: PriceSource::Region,
            })
            .collect()
    }
}

/// Validate a placed order for repetition in `region_id`.
///
/// An order placed in a different region is rejected line by line with
/// [`UnavailableReason::RegionChanged`] before any catalog read is issued.
///
/// # Errors
///
/// Propagates any [`CatalogError`] from the underlying lookups.
#[instrument(skip(catalog, order), fields(order_id = %order.id, region_id = %region_id))]
pub async fn validate_repeat<C: CatalogSource>(
    catalog: &C,
    order: &Order,
    region_id: RegionId,
    is_business_user: bool,
) -> Result<RepeatOrderValidationResult, CatalogError> {
    if order.region_id != region_id {
        info!(order_region = %order.region_id, "Order placed in another region");
        return Ok(RepeatOrderValidationResult::region_changed(&order.items));
    }

    validate_order_for_repeat(catalog, &order.items, region_id, is_business_user).await
}

/// Validate order lines against the current catalog in `region_id`.
///
/// Reads the product table and the region-product table once each. Per line,
/// the first matching rule wins: unknown product (`not_found`), inactive
/// product (`inactive`), no region offer (`not_in_region`), inactive offer
/// (`inactive`), no stock (`out_of_stock`); otherwise the line is available.
///
/// # Errors
///
/// Either lookup failing fails the whole validation; no partial result is
/// returned.
#[instrument(skip(catalog, items), fields(region_id = %region_id, items = items.len()))]
pub async fn validate_order_for_repeat<C: CatalogSource>(
    catalog: &C,
    items: &[OrderItem],
    region_id: RegionId,
    is_business_user: bool,
) -> Result<RepeatOrderValidationResult, CatalogError> {
    let product_ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();

    let products: HashMap<ProductId, CatalogProduct> = catalog
        .products(&product_ids)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();
    let offers: HashMap<ProductId, RegionProduct> = catalog
        .region_products(region_id, &product_ids)
        .await?
        .into_iter()
        .map(|offer| (offer.product_id, offer))
        .collect();

    let mut available_items = Vec::new();
    let mut unavailable_items = Vec::new();

    for item in items {
        match classify(products.get(&item.product_id), offers.get(&item.product_id)) {
            Err(reason) => {
                debug!(product_id = %item.product_id, ?reason, "Line unavailable");
                unavailable_items.push(UnavailableRepeatItem {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    reason,
                });
            }
            Ok(offer) => {
                let price = match offer.business_price {
                    Some(business_price) if is_business_user => business_price,
                    _ => offer.price,
                };
                let old_price = item.charged_unit_price();
                available_items.push(AvailableRepeatItem {
                    product_id: item.product_id,
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    price,
                    old_price,
                    price_changed: price != old_price,
                    business_price: offer.business_price,
                });
            }
        }
    }

    let total_old_price = round2(
        items
            .iter()
            .map(|item| item.charged_unit_price() * Decimal::from(item.quantity))
            .sum(),
    );
    let total_new_price = round2(
        available_items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum(),
    );
    let price_difference = total_new_price - total_old_price;

    let result = RepeatOrderValidationResult {
        can_repeat: !available_items.is_empty(),
        available_items,
        unavailable_items,
        total_old_price,
        total_new_price,
        price_difference,
        price_increased: price_difference > Decimal::ZERO,
    };

    info!(
        available = result.available_items.len(),
        unavailable = result.unavailable_items.len(),
        price_difference = %result.price_difference,
        "Repeat order validated"
    );
    Ok(result)
}

fn classify<'a>(
    product: Option<&CatalogProduct>,
    offer: Option<&'a RegionProduct>,
) -> Result<&'a RegionProduct, UnavailableReason> {
    let product = product.ok_or(UnavailableReason::NotFound)?;
    if !product.is_active {
        return Err(UnavailableReason::Inactive);
    }
    let offer = offer.ok_or(UnavailableReason::NotInRegion)?;
    match offer.unavailable_reason() {
        Some(reason) => Err(reason),
        None => Ok(offer),
    }
}
