//! In-memory catalog, used by the CLI fixtures and in tests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pazar_core::{ProductId, RegionId};

use super::{CatalogError, CatalogProduct, CatalogSource, RegionProduct};

/// Serialized catalog snapshot (YAML/JSON fixture format).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
    #[serde(default)]
    pub region_products: Vec<RegionProduct>,
}

/// Immutable catalog snapshot.
///
/// Built once, then only read, so every lookup observes the same version.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, CatalogProduct>,
    region_products: HashMap<(RegionId, ProductId), RegionProduct>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a master product row.
    #[must_use]
    pub fn with_product(mut self, product: CatalogProduct) -> Self {
        self.products.insert(product.id, product);
        self
    }

    /// Add (or replace) a region offer.
    #[must_use]
    pub fn with_region_product(mut self, region_product: RegionProduct) -> Self {
        self.region_products.insert(
            (region_product.region_id, region_product.product_id),
            region_product,
        );
        self
    }

    /// Number of master products.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl From<CatalogFixture> for InMemoryCatalog {
    fn from(fixture: CatalogFixture) -> Self {
        let catalog = fixture
            .products
            .into_iter()
            .fold(Self::new(), Self::with_product);
        fixture
            .region_products
            .into_iter()
            .fold(catalog, Self::with_region_product)
    }
}

impl CatalogSource for InMemoryCatalog {
    async fn products(&self, ids: &[ProductId]) -> Result<Vec<CatalogProduct>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.products.get(id).cloned())
            .collect())
    }

    async fn region_products(
        &self,
        region_id: RegionId,
        ids: &[ProductId],
    ) -> Result<Vec<RegionProduct>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.region_products.get(&(region_id, *id)).cloned())
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use pazar_core::Availability;

    use super::*;

    fn product(name: &str) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new_v4(),
            name: name.to_string(),
            unit: "kg".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_lookups_return_only_known_rows() {
        let region = RegionId::new_v4();
        let apple = product("Elma");
        let missing = ProductId::new_v4();
        let catalog = InMemoryCatalog::new()
            .with_product(apple.clone())
            .with_region_product(RegionProduct {
                region_id: region,
                product_id: apple.id,
                price: dec!(24.90),
                business_price: None,
                stock_quantity: 10,
                is_active: true,
                availability: Availability::Plenty,
            });

        let products = catalog.products(&[apple.id, missing]).await.unwrap();
        assert_eq!(products, vec![apple.clone()]);

        let offers = catalog
            .region_products(region, &[apple.id, missing])
            .await
            .unwrap();
        assert_eq!(offers.len(), 1);

        let elsewhere = catalog
            .region_products(RegionId::new_v4(), &[apple.id])
            .await
            .unwrap();
        assert!(elsewhere.is_empty());
    }

    #[test]
    fn test_from_fixture() {
        let fixture = CatalogFixture {
            products: vec![product("Armut"), product("Ayva")],
            region_products: Vec::new(),
        };
        assert_eq!(InMemoryCatalog::from(fixture).product_count(), 2);
    }
}
