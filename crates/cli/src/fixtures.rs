//! YAML fixture loading.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use pazar_engine::InMemoryCatalog;
use pazar_engine::catalog::CatalogFixture;

/// Read and parse a YAML fixture.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not valid YAML for `T`.
pub async fn load<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load a catalog snapshot.
///
/// # Errors
///
/// Same as [`load`].
pub async fn catalog(path: &Path) -> Result<InMemoryCatalog, Box<dyn std::error::Error>> {
    let fixture: CatalogFixture = load(path).await?;
    info!(
        path = %path.display(),
        products = fixture.products.len(),
        region_products = fixture.region_products.len(),
        "Loaded catalog fixture"
    );
    Ok(fixture.into())
}
