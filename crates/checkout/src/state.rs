//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CheckoutConfig;
use crate::models::ProductCatalog;
use crate::services::NonceService;
use crate::shipping::zones::ZoneCatalog;
use crate::store::OrderRepository;
use crate::totals::TotalsPipeline;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the zone catalog and the order repository.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CheckoutConfig,
    catalog: Arc<ZoneCatalog>,
    products: Arc<ProductCatalog>,
    orders: OrderRepository,
    nonces: NonceService,
    totals: TotalsPipeline,
}

impl AppState {
    /// Create a new application state from loaded configuration.
    #[must_use]
    pub fn new(
        config: CheckoutConfig,
        catalog: ZoneCatalog,
        products: ProductCatalog,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let products = Arc::new(products);
        let nonces = NonceService::new(config.nonce_ttl);
        let totals = TotalsPipeline::standard(
            Arc::clone(&catalog),
            Arc::clone(&products),
            config.shipping_tax_rate,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                products,
                orders: OrderRepository::new(),
                nonces,
                totals,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &CheckoutConfig {
        &self.inner.config
    }

    /// Get a reference to the shipping zone catalog.
    #[must_use]
    pub fn catalog(&self) -> &ZoneCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn products(&self) -> &ProductCatalog {
        &self.inner.products
    }

    /// Get a reference to the order repository.
    #[must_use]
    pub fn orders(&self) -> &OrderRepository {
        &self.inner.orders
    }

    /// Get a reference to the nonce service.
    #[must_use]
    pub fn nonces(&self) -> &NonceService {
        &self.inner.nonces
    }

    /// Get a reference to the cart totals pipeline.
    #[must_use]
    pub fn totals(&self) -> &TotalsPipeline {
        &self.inner.totals
    }
}
