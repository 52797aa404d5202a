//! Catalog collaborator contract.
//!
//! The engine never owns catalog state. It reads it through [`CatalogSource`],
//! one batch per table per validation call.

pub mod memory;

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pazar_core::{Availability, ProductId, RegionId};

pub use memory::{CatalogFixture, InMemoryCatalog};

/// A catalog read failed. Validations propagate this unchanged.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product table could not be read.
    #[error("product lookup failed: {0}")]
    Products(String),

    /// The region-product table could not be read.
    #[error("region product lookup failed for region {region_id}: {message}")]
    RegionProducts { region_id: RegionId, message: String },
}

/// Master catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub unit: String,
    pub is_active: bool,
}

/// A product's offer in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionProduct {
    pub region_id: RegionId,
    pub product_id: ProductId,
    pub price: Decimal,
    #[serde(default)]
    pub business_price: Option<Decimal>,
    pub stock_quantity: i32,
    pub is_active: bool,
    #[serde(default)]
    pub availability: Availability,
}

impl RegionProduct {
    /// Why this offer cannot be bought, or `None` when it is active and in
    /// stock. An inactive offer reports `inactive` whatever its stock.
    #[must_use]
    pub const fn unavailable_reason(&self) -> Option<UnavailableReason> {
        if !self.is_active {
            Some(UnavailableReason::Inactive)
        } else if self.stock_quantity <= 0 {
            Some(UnavailableReason::OutOfStock)
        } else {
            None
        }
    }
}

/// Why an item cannot be bought (again) in the chosen region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Product no longer exists in the catalog.
    NotFound,
    /// Product or its region offer is switched off.
    Inactive,
    /// No offer for the product in the chosen region.
    NotInRegion,
    /// Region offer has no stock left.
    OutOfStock,
    /// The order was placed in a different region.
    RegionChanged,
}

impl UnavailableReason {
    /// Customer-facing explanation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotFound => "Bu ürün artık satışta değil",
            Self::Inactive => "Bu ürün geçici olarak kullanım dışı",
            Self::NotInRegion => "Bu ürün seçili bölgenizde mevcut değil",
            Self::OutOfStock => "Bu ürün şu anda stokta yok",
            Self::RegionChanged => "Bölge değişikliği nedeniyle bu ürün mevcut değil",
        }
    }
}

/// Read access to catalog and region-product state.
///
/// Each method is a single batch read. Rows for unknown ids are simply
/// absent from the result.
pub trait CatalogSource: Send + Sync {
    /// Master rows for `ids`.
    fn products(
        &self,
        ids: &[ProductId],
    ) -> impl Future<Output = Result<Vec<CatalogProduct>, CatalogError>> + Send;

    /// Region offers for `ids` in `region_id`.
    fn region_products(
        &self,
        region_id: RegionId,
        ids: &[ProductId],
    ) -> impl Future<Output = Result<Vec<RegionProduct>, CatalogError>> + Send;
}
