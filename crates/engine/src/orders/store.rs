//! Order persistence contract.
//!
//! Status writes are compare-and-set: the caller names the status it planned
//! the transition from, and the store refuses the write if another writer got
//! there first. Two concurrent requests therefore cannot both succeed from
//! the same source state.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Mutex;

use pazar_core::{OrderId, OrderStatus, PaymentStatus};

use super::{Order, Transition};

/// An order store operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderStoreError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("order {order_id} is {actual}, expected {expected}")]
    Conflict {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    #[error("order {0} already exists")]
    Duplicate(OrderId),

    #[error("order store error: {0}")]
    Backend(String),
}

/// Persistence for placed orders.
pub trait OrderStore: Send + Sync {
    /// Insert a new order.
    fn insert_order(&self, order: Order) -> impl Future<Output = Result<(), OrderStoreError>> + Send;

    /// Load an order by id.
    fn get_order(
        &self,
        id: OrderId,
    ) -> impl Future<Output = Result<Option<Order>, OrderStoreError>> + Send;

    /// Apply `transition` if the stored status still equals `expected`.
    ///
    /// Returns the updated order.
    fn update_order_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        transition: &Transition,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Order, OrderStoreError>> + Send;

    /// Overwrite the payment status. Never touches fulfillment status.
    fn update_payment_status(
        &self,
        id: OrderId,
        payment_status: PaymentStatus,
        at: DateTime<Utc>,
    ) -> impl Future<Output = Result<Order, OrderStoreError>> + Send;
}

/// Process-local order store.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: Mutex<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders.
    pub async fn len(&self) -> usize {
        self.orders.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.lock().await.is_empty()
    }
}

impl OrderStore for InMemoryOrderStore {
    async fn insert_order(&self, order: Order) -> Result<(), OrderStoreError> {
        let mut orders = self.orders.lock().await;
        if orders.contains_key(&order.id) {
            return Err(OrderStoreError::Duplicate(order.id));
        }
        orders.insert(order.id, order);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, OrderStoreError> {
        Ok(self.orders.lock().await.get(&id).cloned())
    }

    async fn update_order_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        transition: &Transition,
        at: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let mut orders = self.orders.lock().await;
        let current = orders.get(&id).ok_or(OrderStoreError::NotFound(id))?;
        if current.status != expected {
            return Err(OrderStoreError::Conflict {
                order_id: id,
                expected,
                actual: current.status,
            });
        }

        let updated = current.clone().with_transition(transition, at);
        orders.insert(id, updated.clone());
        Ok(updated)
    }

    async fn update_payment_status(
        &self,
        id: OrderId,
        payment_status: PaymentStatus,
        at: DateTime<Utc>,
    ) -> Result<Order, OrderStoreError> {
        let mut orders = self.orders.lock().await;
        let order = orders.get_mut(&id).ok_or(OrderStoreError::NotFound(id))?;
        order.payment_status = payment_status;
        order.updated_at = at;
        Ok(order.clone())
    }
}
