//! Unified error handling for the engine.

use thiserror::Error;

use pazar_core::OrderId;

use crate::catalog::CatalogError;
use crate::orders::{CheckoutError, OrderStoreError, TransitionError};

/// Engine-level error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Status change rejected by the state machine.
    #[error("Transition rejected: {0}")]
    Transition(#[from] TransitionError),

    /// Order store operation failed.
    #[error("Order store error: {0}")]
    Store(#[from] OrderStoreError),

    /// Cart could not be checked out.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order does not exist.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),
}
