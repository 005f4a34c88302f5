//! Cart totals pipeline.
//!
//! Totals are computed by an ordered chain of stages rather than
//! priority-numbered hooks. Ordering is part of the contract: the
//! standard shipping stage writes its quote first and the deferred
//! shipping suppressor runs last, so for deposit and payment-plan carts
//! the suppressor's zeroes always win over the standard stage's writes.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use deferred_shipping_core::Money;

use crate::models::{Cart, ProductCatalog};
use crate::shipping::cost_rules::cost_for_method;
use crate::shipping::package::Package;
use crate::shipping::zones::ZoneCatalog;

/// Shipping-related cart totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CartTotals {
    pub shipping_total: Money,
    pub shipping_taxes: Vec<Money>,
    pub needs_shipping: bool,
    /// Package summaries the host would hand to rate calculation.
    #[serde(skip)]
    pub shipping_packages: Vec<Package>,
}

/// One step in the totals pipeline.
pub trait TotalsStage: Send + Sync {
    /// Stage name for logging.
    fn name(&self) -> &'static str;

    /// Apply this stage's writes to the running totals.
    fn apply(&self, cart: &Cart, totals: &mut CartTotals);
}

/// The ordered totals pipeline.
pub struct TotalsPipeline {
    stages: Vec<Box<dyn TotalsStage>>,
}

impl TotalsPipeline {
    /// The standard pipeline: shipping quote first, deferred-shipping
    /// suppression last.
    #[must_use]
    pub fn standard(
        catalog: Arc<ZoneCatalog>,
        products: Arc<ProductCatalog>,
        shipping_tax_rate: Decimal,
    ) -> Self {
        Self {
            stages: vec![
                Box::new(StandardShippingStage {
                    catalog,
                    products,
                    shipping_tax_rate,
                }),
                // Must stay last so its zeroes win for deferred carts.
                Box::new(DeferredShippingSuppressor),
            ],
        }
    }

    /// Run every stage in order over a fresh `CartTotals`.
    #[must_use]
    pub fn run(&self, cart: &Cart) -> CartTotals {
        let mut totals = CartTotals::default();
        for stage in &self.stages {
            stage.apply(cart, &mut totals);
            tracing::trace!(stage = stage.name(), "Applied totals stage");
        }
        totals
    }
}

/// Baseline shipping quote: cheapest enabled method across all zones,
/// priced against the cart's package summary.
struct StandardShippingStage {
    catalog: Arc<ZoneCatalog>,
    products: Arc<ProductCatalog>,
    shipping_tax_rate: Decimal,
}

impl TotalsStage for StandardShippingStage {
    fn name(&self) -> &'static str {
        "standard_shipping"
    }

    fn apply(&self, cart: &Cart, totals: &mut CartTotals) {
        if cart.is_empty() {
            return;
        }

        let package = Package::from_items(
            cart.lines.iter().map(|line| (line.product_id, line.quantity)),
            &self.products,
        );

        let quote = self
            .catalog
            .all_methods()
            .iter()
            .flat_map(|group| group.methods.iter())
            .map(|method| cost_for_method(method, &package))
            .min()
            .unwrap_or(Money::ZERO);

        totals.needs_shipping = true;
        totals.shipping_total = quote;
        totals.shipping_taxes = if self.shipping_tax_rate.is_zero() {
            Vec::new()
        } else {
            vec![quote * self.shipping_tax_rate]
        };
        totals.shipping_packages = vec![package];
    }
}

/// Zeroes out shipping for deposit and payment-plan carts.
///
/// Shipping for these carts is collected later, once the final
/// destination cost is known; charging the standard quote now would
/// double-charge the shopper.
struct DeferredShippingSuppressor;

impl TotalsStage for DeferredShippingSuppressor {
    fn name(&self) -> &'static str {
        "deferred_shipping_suppressor"
    }

    fn apply(&self, cart: &Cart, totals: &mut CartTotals) {
        if !cart.has_deferred_items() {
            return;
        }

        totals.shipping_total = Money::ZERO;
        totals.shipping_taxes = Vec::new();
        totals.needs_shipping = false;
        totals.shipping_packages = Vec::new();
    }
}
