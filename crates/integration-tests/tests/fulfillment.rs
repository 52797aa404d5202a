//! Integration tests for checkout and the order status lifecycle.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal_macros::dec;

use pazar_core::{OrderId, OrderStatus, PaymentStatus, ProductId, RegionId};
use pazar_engine::orders::{
    CheckoutError, OrderStoreError, TransitionError, TransitionMetadata, TransitionRequest,
};
use pazar_engine::{
    EngineError, FulfillmentService, InMemoryCatalog, InMemoryOrderStore, OrderStore,
    apply_cart_region_change, validate_cart_for_region,
};
use pazar_integration_tests::{cart_item, offer};

fn service() -> FulfillmentService<InMemoryOrderStore> {
    FulfillmentService::new(InMemoryOrderStore::new())
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_after_region_change() {
    let old_region = RegionId::new_v4();
    let new_region = RegionId::new_v4();
    let id = ProductId::new_v4();
    let catalog = InMemoryCatalog::new().with_region_product(offer(new_region, id, dec!(19.90)));
    let cart = vec![cart_item(old_region, id, dec!(18.50), 3)];
    let service = service();

    // A cart still priced for the old region is refused.
    assert!(matches!(
        service.place_order(new_region, &cart).await,
        Err(EngineError::Checkout(CheckoutError::RegionMismatch { .. }))
    ));

    let result = validate_cart_for_region(&catalog, &cart, new_region).await.unwrap();
    let cart = apply_cart_region_change(&cart, new_region, &result);
    let order = service.place_order(new_region, &cart).await.unwrap();

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, PaymentStatus::Unpaid);
    assert_eq!(order.items[0].unit_price, dec!(19.90));
    assert_eq!(order.total_amount, dec!(59.70));
    assert!(service.store().get_order(order.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_empty_cart_checkout_rejected() {
    assert!(matches!(
        service().place_order(RegionId::new_v4(), &[]).await,
        Err(EngineError::Checkout(CheckoutError::EmptyCart))
    ));
}

// =============================================================================
// Status Transitions
// =============================================================================

#[tokio::test]
async fn test_full_lifecycle_with_delivery_notes() {
    let region = RegionId::new_v4();
    let service = service();
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();

    service.advance(order.id).await.unwrap();
    service.advance(order.id).await.unwrap();
    service.advance(order.id).await.unwrap();

    let delivered = service
        .transition(
            order.id,
            &TransitionRequest {
                target: OrderStatus::Delivered,
                metadata: TransitionMetadata {
                    // ignored: not a cancellation
                    cancellation_reason: Some("yok".to_string()),
                    delivery_notes: Some("Komşuya teslim edildi".to_string()),
                    delivery_photo_url: None,
                },
            },
        )
        .await
        .unwrap();

    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.delivery_notes.as_deref(), Some("Komşuya teslim edildi"));
    assert_eq!(delivered.cancellation_reason, None);
    assert!(delivered.updated_at >= delivered.created_at);
}

#[tokio::test]
async fn test_skips_and_late_cancellation_rejected() {
    let region = RegionId::new_v4();
    let service = service();
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();

    assert!(matches!(
        service
            .transition(order.id, &TransitionRequest::to(OrderStatus::Delivered))
            .await,
        Err(EngineError::Transition(TransitionError::NotAllowed { .. }))
    ));

    for _ in 0..3 {
        service.advance(order.id).await.unwrap();
    }
    assert!(matches!(
        service.cancel(order.id, "Geç kaldı").await,
        Err(EngineError::Transition(TransitionError::NotAllowed {
            from: OrderStatus::Shipped,
            to: OrderStatus::Cancelled,
        }))
    ));

    // Rejections leave the stored order untouched.
    assert_eq!(service.order(order.id).await.unwrap().status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_blank_cancellation_reason_rejected() {
    let region = RegionId::new_v4();
    let service = service();
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();

    assert!(matches!(
        service.cancel(order.id, " \t ").await,
        Err(EngineError::Transition(TransitionError::MissingCancellationReason))
    ));
    assert_eq!(service.order(order.id).await.unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_concurrent_transitions_only_one_wins() {
    let region = RegionId::new_v4();
    let service = Arc::new(service());
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();

    let confirm = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.advance(order.id).await })
    };
    let cancel = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.cancel(order.id, "Müşteri vazgeçti").await })
    };
    let outcomes = [confirm.await.unwrap(), cancel.await.unwrap()];

    // Either both apply in sequence (confirm then cancel is legal) or the
    // loser sees the winner's state. Never two writes from pending.
    let final_order = service.order(order.id).await.unwrap();
    let successes = outcomes.iter().filter(|o| o.is_ok()).count();
    match successes {
        2 => assert_eq!(final_order.status, OrderStatus::Cancelled),
        1 => {
            let failure = outcomes.iter().find_map(|o| o.as_ref().err()).unwrap();
            assert!(matches!(
                failure,
                EngineError::Store(OrderStoreError::Conflict { .. })
                    | EngineError::Transition(TransitionError::Terminal(_))
            ));
        }
        n => panic!("unexpected number of successful transitions: {n}"),
    }
}

#[tokio::test]
async fn test_stale_plan_refused_by_store() {
    let region = RegionId::new_v4();
    let service = service();
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();
    service.advance(order.id).await.unwrap();

    // Planned against the order as it was at placement.
    let stale = pazar_engine::orders::Transition::plan(
        order.status,
        &TransitionRequest::cancel("eski plan"),
    )
    .unwrap();
    let err = service
        .store()
        .update_order_status(order.id, order.status, &stale, chrono::Utc::now())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        OrderStoreError::Conflict {
            order_id: order.id,
            expected: OrderStatus::Pending,
            actual: OrderStatus::Confirmed,
        }
    );
}

// =============================================================================
// Payment
// =============================================================================

#[tokio::test]
async fn test_payment_updates_are_independent() {
    let region = RegionId::new_v4();
    let service = service();
    let order = service
        .place_order(region, &[cart_item(region, ProductId::new_v4(), dec!(10), 1)])
        .await
        .unwrap();

    let partial = service
        .set_payment_status(order.id, PaymentStatus::Partial)
        .await
        .unwrap();
    assert_eq!(partial.status, OrderStatus::Pending);
    assert_eq!(partial.payment_status.label(), "Kısmi Ödeme");

    service.advance(order.id).await.unwrap();
    let paid = service
        .set_payment_status(order.id, PaymentStatus::Paid)
        .await
        .unwrap();
    assert_eq!(paid.status, OrderStatus::Confirmed);
    assert_eq!(paid.payment_status, PaymentStatus::Paid);

    assert!(matches!(
        service
            .set_payment_status(OrderId::new_v4(), PaymentStatus::Paid)
            .await,
        Err(EngineError::OrderNotFound(_))
    ));
}
