//! Integration tests for repeat-order validation.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal_macros::dec;

use pazar_core::{OrderId, ProductId, RegionId};
use pazar_engine::catalog::{CatalogProduct, RegionProduct};
use pazar_engine::orders::{NewOrder, OrderItem};
use pazar_engine::{
    CatalogError, InMemoryCatalog, Order, UnavailableReason, validate_order_for_repeat,
    validate_repeat,
};
use pazar_integration_tests::{
    CountingCatalog, FailOn, FailingCatalog, offer, order_item, product,
};

/// A placed order built through checkout's own constructor.
fn placed_order(region_id: RegionId, items: Vec<OrderItem>) -> Order {
    let total_amount = items.iter().map(OrderItem::total_price).sum();
    NewOrder {
        region_id,
        items,
        total_amount,
    }
    .into_order(OrderId::new_v4(), Utc::now())
}

#[tokio::test]
async fn test_every_reason_in_one_order() {
    let region = RegionId::new_v4();
    let [ok, gone, retired, elsewhere, paused, empty] = [(); 6].map(|()| ProductId::new_v4());
    let ids = [ok, gone, retired, elsewhere, paused, empty];

    let catalog = InMemoryCatalog::new()
        .with_product(product(ok, "Nohut"))
        .with_product(CatalogProduct {
            is_active: false,
            ..product(retired, "Eski Ürün")
        })
        .with_product(product(elsewhere, "Mercimek"))
        .with_product(product(paused, "Bulgur"))
        .with_product(product(empty, "Pirinç"))
        .with_region_product(offer(region, ok, dec!(42)))
        .with_region_product(offer(region, retired, dec!(10)))
        .with_region_product(RegionProduct {
            is_active: false,
            ..offer(region, paused, dec!(30))
        })
        .with_region_product(RegionProduct {
            stock_quantity: 0,
            ..offer(region, empty, dec!(55))
        });

    let items: Vec<OrderItem> = ids
        .iter()
        .map(|id| order_item(*id, 1, dec!(40)))
        .collect();

    let result = validate_order_for_repeat(&catalog, &items, region, false)
        .await
        .unwrap();

    assert!(result.can_repeat);
    assert_eq!(result.available_items.len(), 1);
    assert_eq!(result.available_items[0].product_id, ok);
    assert_eq!(result.available_items[0].price, dec!(42));
    assert!(result.available_items[0].price_changed);

    let reasons: Vec<_> = result
        .unavailable_items
        .iter()
        .map(|item| (item.product_id, item.reason))
        .collect();
    assert_eq!(
        reasons,
        vec![
            (gone, UnavailableReason::NotFound),
            (retired, UnavailableReason::Inactive),
            (elsewhere, UnavailableReason::NotInRegion),
            (paused, UnavailableReason::Inactive),
            (empty, UnavailableReason::OutOfStock),
        ]
    );

    // Old total covers all six lines, new total only the available one.
    assert_eq!(result.total_old_price, dec!(240));
    assert_eq!(result.total_new_price, dec!(42));
    assert_eq!(result.price_difference, dec!(-198));
    assert!(!result.price_increased);
    assert_eq!(result.skipped_count(), 5);
}

#[tokio::test]
async fn test_unchanged_order_repeats_cleanly() {
    let region = RegionId::new_v4();
    let (first, second) = (ProductId::new_v4(), ProductId::new_v4());
    let catalog = InMemoryCatalog::new()
        .with_product(product(first, "Elma"))
        .with_product(product(second, "Armut"))
        .with_region_product(offer(region, first, dec!(50)))
        .with_region_product(offer(region, second, dec!(30)));
    let items = vec![order_item(first, 2, dec!(50)), order_item(second, 1, dec!(30))];

    let result = validate_order_for_repeat(&catalog, &items, region, false)
        .await
        .unwrap();

    assert!(result.can_repeat);
    assert!(result.unavailable_items.is_empty());
    assert!(result.available_items.iter().all(|item| !item.price_changed));
    assert_eq!(result.total_old_price, dec!(130));
    assert_eq!(result.price_difference, dec!(0));
    assert!(!result.price_increased);
}

#[tokio::test]
async fn test_nothing_available_cannot_repeat() {
    let region = RegionId::new_v4();
    let items = vec![order_item(ProductId::new_v4(), 2, dec!(15))];

    let result = validate_order_for_repeat(&InMemoryCatalog::new(), &items, region, false)
        .await
        .unwrap();

    assert!(!result.can_repeat);
    assert!(result.available_items.is_empty());
    assert_eq!(result.total_new_price, dec!(0));
    assert!(result.cart_items(region).is_empty());
}

#[tokio::test]
async fn test_region_changed_issues_no_lookups() {
    let placed_in = RegionId::new_v4();
    let shopping_in = RegionId::new_v4();
    let id = ProductId::new_v4();
    let catalog = CountingCatalog::new(
        InMemoryCatalog::new()
            .with_product(product(id, "Fındık"))
            .with_region_product(offer(shopping_in, id, dec!(200))),
    );
    let order = placed_order(placed_in, vec![order_item(id, 1, dec!(180))]);

    let result = validate_repeat(&catalog, &order, shopping_in, false)
        .await
        .unwrap();

    assert!(!result.can_repeat);
    assert_eq!(result.unavailable_items.len(), 1);
    assert_eq!(result.unavailable_items[0].reason, UnavailableReason::RegionChanged);
    assert_eq!(result.total_old_price, dec!(0));
    assert_eq!(result.total_new_price, dec!(0));
    assert_eq!(catalog.product_reads(), 0);
    assert_eq!(catalog.region_reads(), 0);
}

#[tokio::test]
async fn test_same_region_reads_each_table_once() {
    let region = RegionId::new_v4();
    let (a, b) = (ProductId::new_v4(), ProductId::new_v4());
    let catalog = CountingCatalog::new(
        InMemoryCatalog::new()
            .with_product(product(a, "Un"))
            .with_product(product(b, "Şeker"))
            .with_region_product(offer(region, a, dec!(20)))
            .with_region_product(RegionProduct {
                business_price: Some(dec!(27)),
                ..offer(region, b, dec!(30))
            }),
    );
    let order = placed_order(
        region,
        vec![
            order_item(a, 2, dec!(20)),
            OrderItem {
                business_unit_price: Some(dec!(25)),
                ..order_item(b, 1, dec!(30))
            },
        ],
    );

    let result = validate_repeat(&catalog, &order, region, true).await.unwrap();

    assert_eq!(catalog.product_reads(), 1);
    assert_eq!(catalog.region_reads(), 1);
    assert_eq!(result.total_old_price, dec!(65));
    assert_eq!(result.total_new_price, dec!(67));
    assert_eq!(result.price_difference, dec!(2));
    assert!(result.price_increased);

    let cart = result.cart_items(region);
    assert_eq!(cart.len(), 2);
    assert_eq!(cart[1].unit_price_at_add, dec!(27));
}

#[tokio::test]
async fn test_lookup_failures_are_propagated() {
    let region = RegionId::new_v4();
    let id = ProductId::new_v4();
    let inner = InMemoryCatalog::new()
        .with_product(product(id, "Çay"))
        .with_region_product(offer(region, id, dec!(90)));
    let items = vec![order_item(id, 1, dec!(90))];

    let products_down = FailingCatalog::new(inner.clone(), FailOn::Products);
    assert!(matches!(
        validate_order_for_repeat(&products_down, &items, region, false).await,
        Err(CatalogError::Products(_))
    ));

    let regions_down = FailingCatalog::new(inner, FailOn::RegionProducts);
    assert!(matches!(
        validate_order_for_repeat(&regions_down, &items, region, false).await,
        Err(CatalogError::RegionProducts { .. })
    ));
}
