//! Products as a read-only dimension source.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use deferred_shipping_core::ProductId;

use crate::shipping::zones::CatalogError;

/// Physical attributes of a product.
///
/// All dimensions are optional; absent values contribute zero to package
/// summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub length: Option<Decimal>,
    #[serde(default)]
    pub width: Option<Decimal>,
    #[serde(default)]
    pub height: Option<Decimal>,
}

/// In-memory product lookup, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: HashMap<ProductId, Product>,
}

impl ProductCatalog {
    /// Build a catalog from a list of products.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        tracing::info!(count = products.len(), "Loaded product catalog");
        Ok(Self::new(products))
    }

    /// Resolve a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }
}
