//! Repeat-order command.

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use pazar_core::{OrderId, RegionId, format_price};
use pazar_engine::orders::{NewOrder, OrderItem};
use pazar_engine::validate_repeat;

use crate::fixtures;

/// A past order as stored in a fixture file.
#[derive(Debug, Deserialize)]
struct PastOrder {
    region_id: RegionId,
    items: Vec<OrderItem>,
}

/// Validate a past order fixture for repetition in `region_id`.
///
/// # Errors
///
/// Returns an error if a fixture cannot be loaded or a catalog lookup fails.
pub async fn run(
    catalog_path: &Path,
    order_path: &Path,
    region_id: RegionId,
    is_business_user: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = fixtures::catalog(catalog_path).await?;
    let past: PastOrder = fixtures::load(order_path).await?;

    let order = NewOrder {
        region_id: past.region_id,
        total_amount: past.items.iter().map(OrderItem::total_price).sum(),
        items: past.items,
    }
    .into_order(OrderId::new_v4(), Utc::now());

    let result = validate_repeat(&catalog, &order, region_id, is_business_user).await?;

    for item in &result.available_items {
        if item.price_changed {
            info!(
                "  {} x{}: {} -> {}",
                item.product_name,
                item.quantity,
                format_price(item.old_price),
                format_price(item.price)
            );
        } else {
            info!(
                "  {} x{}: {}",
                item.product_name,
                item.quantity,
                format_price(item.price)
            );
        }
    }
    for item in &result.unavailable_items {
        warn!("  Skipped: {} ({})", item.product_name, item.reason.message());
    }

    if !result.can_repeat {
        warn!("Order cannot be repeated in region {region_id}");
        return Ok(());
    }

    info!(
        "Total: {} -> {} ({} skipped)",
        format_price(result.total_old_price),
        format_price(result.total_new_price),
        result.skipped_count()
    );
    if result.price_increased {
        info!("Prices increased by {}", format_price(result.price_difference));
    }

    let cart = result.cart_items(region_id);
    info!("{}", serde_json::to_string_pretty(&cart)?);

    Ok(())
}
