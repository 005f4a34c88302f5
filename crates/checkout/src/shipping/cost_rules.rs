//! Threshold-keyed cost tables and per-method cost evaluation.
//!
//! Cost tables are configured as delimited strings,
//! `"threshold:cost,threshold:cost,..."`. Lookup walks the pairs in the
//! order the string lists them and returns the cost of the first threshold
//! greater than or equal to the input value; configuration order is
//! authoritative, NOT numeric order. A table listed as `"5:10,1:5"` prices
//! a 0.5kg package at 10, because 5 is the first listed threshold that
//! covers it. Preserved for compatibility with existing merchant
//! configuration; do not change this to a sorted lookup.

use std::str::FromStr;

use rust_decimal::Decimal;

use deferred_shipping_core::Money;

use super::package::Package;
use super::zones::ShippingMethod;

/// A parsed cost table: (threshold, cost) pairs in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostTable {
    entries: Vec<(Decimal, Money)>,
}

impl CostTable {
    /// Parse a `"threshold:cost,..."` configuration string.
    ///
    /// Pairs that do not split into exactly two numeric tokens are skipped
    /// without error; an entirely malformed string yields an empty table.
    /// A repeated threshold updates the existing entry in place, so the
    /// last listed cost wins while the threshold keeps its first position.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut entries: Vec<(Decimal, Money)> = Vec::new();

        for pair in raw.split(',') {
            let mut tokens = pair.split(':');
            let Some(threshold) = tokens.next().map(str::trim) else {
                continue;
            };
            let Some(cost) = tokens.next().map(str::trim) else {
                continue;
            };
            if tokens.next().is_some() {
                continue;
            }
            let Ok(threshold) = Decimal::from_str(threshold) else {
                continue;
            };
            let Ok(cost) = Money::from_str(cost) else {
                continue;
            };

            if let Some(entry) = entries.iter_mut().find(|(t, _)| *t == threshold) {
                entry.1 = cost;
            } else {
                entries.push((threshold, cost));
            }
        }

        Self { entries }
    }

    /// Cost of the first listed threshold that covers `value`.
    ///
    /// Returns zero when no threshold covers the value.
    #[must_use]
    pub fn lookup(&self, value: Decimal) -> Money {
        self.entries
            .iter()
            .find(|(threshold, _)| value <= *threshold)
            .map_or(Money::ZERO, |(_, cost)| *cost)
    }

    /// Whether the table holds no usable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Total estimated cost of shipping `package` via `method`.
///
/// Starts from the method's base cost, adds the weight-table lookup when
/// the package has weight, and adds the item-table lookup regardless of
/// weight. Always returns a valid amount; absent configuration contributes
/// zero.
#[must_use]
pub fn cost_for_method(method: &ShippingMethod, package: &Package) -> Money {
    let mut cost = method.base_cost();

    if package.weight > Decimal::ZERO
        && let Some(raw) = method.weight_costs.as_deref()
    {
        cost += CostTable::parse(raw).lookup(package.weight);
    }

    if let Some(raw) = method.item_costs.as_deref() {
        cost += CostTable::parse(raw).lookup(Decimal::from(package.item_count));
    }

    cost
}
