//! Integration tests for Pazar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pazar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `pricing` - Price composition through the public API
//! - `cart_region` - Region-change revalidation and apply
//! - `repeat_order` - Repeat-order validation, including lookup counting
//! - `fulfillment` - Checkout and the order status lifecycle
//! - `fixtures` - CLI fixture files parse into engine types
//! - `postgres_types` - Database encodings of the core ids
//!
//! This crate holds the shared helpers: a catalog builder and catalog
//! wrappers that count or fail lookups.

use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use pazar_core::{Availability, ProductId, RegionId};
use pazar_engine::cart::{CartItem, PriceSource};
use pazar_engine::catalog::{CatalogProduct, RegionProduct};
use pazar_engine::orders::OrderItem;
use pazar_engine::{CatalogError, CatalogSource, InMemoryCatalog};

// =============================================================================
// Builders
// =============================================================================

/// Active master product.
#[must_use]
pub fn product(id: ProductId, name: &str) -> CatalogProduct {
    CatalogProduct {
        id,
        name: name.to_string(),
        unit: "kg".to_string(),
        is_active: true,
    }
}

/// Active, stocked region offer at `price`.
#[must_use]
pub fn offer(region_id: RegionId, product_id: ProductId, price: Decimal) -> RegionProduct {
    RegionProduct {
        region_id,
        product_id,
        price,
        business_price: None,
        stock_quantity: 25,
        is_active: true,
        availability: Availability::Plenty,
    }
}

/// Cart line priced in `region_id` without a variant.
#[must_use]
pub fn cart_item(
    region_id: RegionId,
    product_id: ProductId,
    price: Decimal,
    quantity: u32,
) -> CartItem {
    CartItem {
        product_id,
        product_name: format!("Ürün {product_id}"),
        quantity,
        unit_price_at_add: price,
        region_id_at_add: region_id,
        selected_variant: None,
        supplier_id: None,
        supplier_product_id: None,
        supplier_name: String::new(),
        price_source: PriceSource::Region,
    }
}

/// Order line charged at `unit_price`.
#[must_use]
pub fn order_item(product_id: ProductId, quantity: u32, unit_price: Decimal) -> OrderItem {
    OrderItem {
        product_id,
        product_name: format!("Ürün {product_id}"),
        quantity,
        unit_price,
        business_unit_price: None,
        variant: None,
    }
}

// =============================================================================
// Catalog Wrappers
// =============================================================================

/// Catalog that counts every batch read it serves.
#[derive(Debug, Default)]
pub struct CountingCatalog {
    inner: InMemoryCatalog,
    product_reads: AtomicUsize,
    region_reads: AtomicUsize,
}

impl CountingCatalog {
    #[must_use]
    pub fn new(inner: InMemoryCatalog) -> Self {
        Self {
            inner,
            product_reads: AtomicUsize::new(0),
            region_reads: AtomicUsize::new(0),
        }
    }

    /// Product batch reads served so far.
    #[must_use]
    pub fn product_reads(&self) -> usize {
        self.product_reads.load(Ordering::SeqCst)
    }

    /// Region-product batch reads served so far.
    #[must_use]
    pub fn region_reads(&self) -> usize {
        self.region_reads.load(Ordering::SeqCst)
    }
}

impl CatalogSource for CountingCatalog {
    async fn products(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, CatalogError> {
        self.product_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.products(ids).await
    }

    async fn region_products(
        &self,
        region_id: RegionId,
        ids: &[ProductId],
    ) -> Result<Vec<RegionProduct>, CatalogError> {
        self.region_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.region_products(region_id, ids).await
    }
}

/// Which table a [`FailingCatalog`] refuses to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Products,
    RegionProducts,
}

/// Catalog whose reads of one table always fail.
#[derive(Debug)]
pub struct FailingCatalog {
    inner: InMemoryCatalog,
    fail_on: FailOn,
}

impl FailingCatalog {
    #[must_use]
    pub const fn new(inner: InMemoryCatalog, fail_on: FailOn) -> Self {
        Self { inner, fail_on }
    }
}

impl CatalogSource for FailingCatalog {
    async fn products(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, CatalogError> {
        if self.fail_on == FailOn::Products {
            return Err(CatalogError::Products("connection refused".to_string()));
        }
        self.inner.products(ids).await
    }

    async fn region_products(
        &self,
        region_id: RegionId,
        ids: &[ProductId],
    ) -> Result<Vec<RegionProduct>, CatalogError> {
        if self.fail_on == FailOn::RegionProducts {
            return Err(CatalogError::RegionProducts {
                region_id,
                message: "connection refused".to_string(),
            });
        }
        self.inner.region_products(region_id, ids).await
    }
}
