//! Pazar Engine - Price computation and cart/order consistency.
//!
//! This crate turns supplier prices into customer prices and keeps carts and
//! orders consistent as regions, catalog rows and order statuses change.
//!
//! # Architecture
//!
//! Pricing is pure and synchronous. Everything that needs catalog or order
//! state reads it through a collaborator trait ([`CatalogSource`],
//! [`OrderStore`]) so the engine owns no storage of its own. In-memory
//! implementations of both are provided for tools and tests.
//!
//! # Modules
//!
//! - [`pricing`] - Commission, regional and variant price composition
//! - [`cart`] - Cart model and region-change revalidation
//! - [`orders`] - Repeat-order validation, checkout and fulfillment
//! - [`catalog`] - Catalog collaborator contract
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod orders;
pub mod pricing;

pub use cart::{
    CartItem, CartValidationResult, apply_cart_region_change, validate_cart_for_region,
};
pub use catalog::{CatalogError, CatalogSource, InMemoryCatalog, UnavailableReason};
pub use config::{ConfigError, EngineConfig};
pub use error::EngineError;
pub use orders::{
    FulfillmentService, InMemoryOrderStore, Order, OrderStore, RepeatOrderValidationResult,
    validate_order_for_repeat, validate_repeat,
};
