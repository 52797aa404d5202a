//! Orders: the placed-order model, repeat-order validation and the
//! fulfillment state machine.

pub mod fulfillment;
pub mod repeat;
pub mod service;
pub mod store;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pazar_core::{OrderId, OrderStatus, PaymentStatus, ProductId, RegionId, round2};

use crate::cart::CartItem;

pub use fulfillment::{
    CancellationReason, DeliveryEvidence, Transition, TransitionError, TransitionMetadata,
    TransitionRequest, get_next_status,
};
pub use repeat::{
    AvailableRepeatItem, RepeatOrderValidationResult, UnavailableRepeatItem,
    validate_order_for_repeat, validate_repeat,
};
pub use service::FulfillmentService;
pub use store::{InMemoryOrderStore, OrderStore, OrderStoreError};

/// A line of a placed order. Immutable once the order exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Business price actually charged, when it differed from `unit_price`.
    #[serde(default)]
    pub business_unit_price: Option<Decimal>,
    #[serde(default)]
    pub variant: Option<String>,
}

impl OrderItem {
    /// Price the customer paid per unit.
    #[must_use]
    pub fn charged_unit_price(&self) -> Decimal {
        self.business_unit_price.unwrap_or(self.unit_price)
    }

    /// `round2(charged_unit_price * quantity)`.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        round2(self.charged_unit_price() * Decimal::from(self.quantity))
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub region_id: RegionId,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub cancellation_reason: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub delivery_notes: Option<String>,
    pub delivery_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// This order after `transition`, recorded at `at`.
    ///
    /// Does not check legality; plan the transition with
    /// [`Transition::plan`] first.
    #[must_use]
    pub fn with_transition(mut self, transition: &Transition, at: DateTime<Utc>) -> Self {
        self.status = transition.to;
        self.updated_at = at;

        if let Some(reason) = &transition.cancellation_reason {
            self.cancellation_reason = Some(reason.as_str().to_owned());
            self.cancelled_at = Some(at);
        }

        if transition.to == OrderStatus::Delivered {
            self.delivered_at = Some(at);
            if let Some(evidence) = &transition.delivery {
                self.delivery_notes.clone_from(&evidence.notes);
                self.delivery_photo_url.clone_from(&evidence.photo_url);
            }
        }

        self
    }
}

/// Checkout could not turn the cart into an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    #[error("cart item {product_id} was priced for region {found}, checkout region is {expected}")]
    RegionMismatch {
        product_id: ProductId,
        expected: RegionId,
        found: RegionId,
    },
}

/// An order about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub region_id: RegionId,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
}

impl NewOrder {
    /// Freeze a cart into order lines.
    ///
    /// Every cart item must have been priced for `region_id`; a cart that
    /// still carries another region's prices has to be revalidated first.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart and
    /// [`CheckoutError::RegionMismatch`] for an item priced in another region.
    pub fn from_cart(region_id: RegionId, cart: &[CartItem]) -> Result<Self, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(stale) = cart.iter().find(|item| item.region_id_at_add != region_id) {
            return Err(CheckoutError::RegionMismatch {
                product_id: stale.product_id,
                expected: region_id,
                found: stale.region_id_at_add,
            });
        }

        let items: Vec<OrderItem> = cart
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id,
                product_name: item.product_name.clone(),
                quantity: item.quantity,
                unit_price: round2(item.unit_price()),
                business_unit_price: None,
                variant: item
                    .selected_variant
                    .as_ref()
                    .map(|variant| variant.label.clone()),
            })
            .collect();
        let total_amount = items.iter().map(OrderItem::total_price).sum();

        Ok(Self {
            region_id,
            items,
            total_amount,
        })
    }

    /// Materialize as a pending, unpaid order.
    #[must_use]
    pub fn into_order(self, id: OrderId, at: DateTime<Utc>) -> Order {
        Order {
            id,
            region_id: self.region_id,
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            items: self.items,
            total_amount: self.total_amount,
            cancellation_reason: None,
            cancelled_at: None,
            delivered_at: None,
            delivery_notes: None,
            delivery_photo_url: None,
            created_at: at,
            updated_at: at,
        }
    }
}
