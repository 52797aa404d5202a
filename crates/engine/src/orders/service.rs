//! Order placement and fulfillment on top of an [`OrderStore`].

use chrono::Utc;
use tracing::{info, instrument, warn};

use pazar_core::{OrderId, PaymentStatus, RegionId};

use super::{
    NewOrder, Order, OrderStore, OrderStoreError, Transition, TransitionError, TransitionRequest,
};
use crate::cart::CartItem;
use crate::error::EngineError;

/// Drives orders through their lifecycle.
///
/// Every status change is planned against the stored status and written back
/// with a compare-and-set on that same status, so a stale plan is refused by
/// the store instead of overwriting a newer state.
#[derive(Debug)]
pub struct FulfillmentService<S> {
    store: S,
}

impl<S: OrderStore> FulfillmentService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Check out `cart` in `region_id` as a new pending order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Checkout`] for an empty or stale cart and
    /// [`EngineError::Store`] if the insert fails.
    #[instrument(skip(self, cart), fields(region_id = %region_id, items = cart.len()))]
    pub async fn place_order(
        &self,
        region_id: RegionId,
        cart: &[CartItem],
    ) -> Result<Order, EngineError> {
        let order = NewOrder::from_cart(region_id, cart)
            .inspect_err(|e| warn!(error = %e, "Checkout rejected"))?
            .into_order(OrderId::new_v4(), Utc::now());

        self.store.insert_order(order.clone()).await?;
        info!(order_id = %order.id, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    /// Load an order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OrderNotFound`] if no such order exists.
    pub async fn order(&self, order_id: OrderId) -> Result<Order, EngineError> {
        self.store
            .get_order(order_id)
            .await?
            .ok_or(EngineError::OrderNotFound(order_id))
    }

    /// Apply `request` to the order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::OrderNotFound`] if the order does not exist
    /// - [`EngineError::Transition`] if the state machine rejects the request
    /// - [`EngineError::Store`] with [`OrderStoreError::Conflict`] if the
    ///   order changed status since it was read
    #[instrument(skip(self, request), fields(order_id = %order_id, target = %request.target))]
    pub async fn transition(
        &self,
        order_id: OrderId,
        request: &TransitionRequest,
    ) -> Result<Order, EngineError> {
        let order = self.order(order_id).await?;
        self.apply(&order, request).await
    }

    /// Move the order one step along the happy path.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::Terminal`] for delivered or cancelled
    /// orders, plus everything [`Self::transition`] returns.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn advance(&self, order_id: OrderId) -> Result<Order, EngineError> {
        let order = self.order(order_id).await?;
        let Some(next) = order.status.next_status() else {
            warn!(status = %order.status, "Order has no next status");
            return Err(TransitionError::Terminal(order.status).into());
        };
        self.apply(&order, &TransitionRequest::to(next)).await
    }

    /// Cancel the order with `reason`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::transition`].
    pub async fn cancel(&self, order_id: OrderId, reason: &str) -> Result<Order, EngineError> {
        self.transition(order_id, &TransitionRequest::cancel(reason))
            .await
    }

    /// Record a payment status. Fulfillment status is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::OrderNotFound`] if the order does not exist.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn set_payment_status(
        &self,
        order_id: OrderId,
        payment_status: PaymentStatus,
    ) -> Result<Order, EngineError> {
        let order = self
            .store
            .update_payment_status(order_id, payment_status, Utc::now())
            .await
            .map_err(|e| match e {
                OrderStoreError::NotFound(id) => EngineError::OrderNotFound(id),
                other => other.into(),
            })?;
        info!(payment_status = %order.payment_status, "Payment status updated");
        Ok(order)
    }

    async fn apply(&self, order: &Order, request: &TransitionRequest) -> Result<Order, EngineError> {
        let transition = Transition::plan(order.status, request).inspect_err(|e| {
            warn!(order_id = %order.id, from = %order.status, error = %e, "Transition rejected");
        })?;

        let updated = self
            .store
            .update_order_status(order.id, order.status, &transition, Utc::now())
            .await
            .inspect_err(|e| {
                if matches!(e, OrderStoreError::Conflict { .. }) {
                    warn!(order_id = %order.id, error = %e, "Concurrent status change");
                }
            })?;

        info!(
            order_id = %updated.id,
            from = %transition.from,
            to = %transition.to,
            "Order status changed"
        );
        Ok(updated)
    }
}
