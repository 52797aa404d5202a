//! Cart region-change command.

use std::path::Path;

use tracing::{info, warn};

use pazar_core::{RegionId, format_price};
use pazar_engine::cart::cart_total;
use pazar_engine::{CartItem, apply_cart_region_change, validate_cart_for_region};

use crate::fixtures;

/// Revalidate a cart fixture for `region_id`.
///
/// With `apply`, the change-set is applied and the resulting cart is logged
/// as JSON.
///
/// # Errors
///
/// Returns an error if a fixture cannot be loaded or the catalog lookup fails.
pub async fn region(
    catalog_path: &Path,
    cart_path: &Path,
    region_id: RegionId,
    apply: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = fixtures::catalog(catalog_path).await?;
    let cart: Vec<CartItem> = fixtures::load(cart_path).await?;
    info!(items = cart.len(), "Loaded cart");

    let result = validate_cart_for_region(&catalog, &cart, region_id).await?;

    if !result.has_changes {
        info!("Cart is valid for region {region_id}, no changes");
        return Ok(());
    }

    for item in &result.invalid_items {
        warn!(
            "  Removed: {} ({})",
            item.product_name,
            item.reason.message()
        );
    }
    for item in &result.reprice_items {
        info!(
            "  Repriced: {} {} -> {}",
            item.product_name,
            format_price(item.old_price),
            format_price(item.new_price)
        );
    }

    if apply {
        let updated = apply_cart_region_change(&cart, region_id, &result);
        info!(
            "Cart total: {} -> {}",
            format_price(cart_total(&cart)),
            format_price(cart_total(&updated))
        );
        info!("{}", serde_json::to_string_pretty(&updated)?);
    }

    Ok(())
}
