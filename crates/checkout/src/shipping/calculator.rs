//! Final shipping cost calculation.
//!
//! Composes the package summarizer, zone catalog and cost rules, then
//! picks the cheapest candidate. Stateless and idempotent: the same order
//! and configuration always produce the same result.

use deferred_shipping_core::Money;

use crate::models::{Order, ProductCatalog};

use super::cost_rules::cost_for_method;
use super::package::Package;
use super::zones::ZoneCatalog;

/// A shipping method candidate annotated with its evaluated cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMethod {
    pub id: String,
    pub title: String,
    pub zone_label: String,
    pub cost: Money,
}

/// Pick the cheapest candidate.
///
/// Stable sort: among equal-cost candidates the first in input order wins,
/// keeping the selection deterministic.
#[must_use]
pub fn select_best(mut candidates: Vec<CandidateMethod>) -> Option<CandidateMethod> {
    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by_key(|candidate| candidate.cost);
    candidates.into_iter().next()
}

/// Evaluate every candidate method for the order's destination.
#[must_use]
pub fn candidates_for_order(
    order: &Order,
    catalog: &ZoneCatalog,
    products: &ProductCatalog,
) -> Vec<CandidateMethod> {
    let package = Package::from_order(order, products);
    let package = &package;

    catalog
        .methods_for_address(&order.shipping_address)
        .into_iter()
        .flat_map(|group| {
            let zone_label = group.zone_label.to_string();
            group
                .methods
                .into_iter()
                .map(move |method| CandidateMethod {
                    id: method.id.clone(),
                    title: method.title.clone(),
                    zone_label: zone_label.clone(),
                    cost: cost_for_method(method, package),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Best-effort final shipping cost for an order.
///
/// Absence of zones or methods degrades to zero rather than an error.
#[must_use]
pub fn calculate_final_shipping_cost(
    order: &Order,
    catalog: &ZoneCatalog,
    products: &ProductCatalog,
) -> Money {
    let candidates = candidates_for_order(order, catalog, products);
    select_best(candidates).map_or(Money::ZERO, |chosen| {
        tracing::debug!(
            order_id = %order.id,
            method = %chosen.id,
            cost = %chosen.cost,
            "Selected cheapest shipping method"
        );
        chosen.cost
    })
}
