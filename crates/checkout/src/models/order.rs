//! Orders as seen by the deferred shipping service.
//!
//! The order store itself belongs to the host platform; this service only
//! reads line items, the shipping address and status, and reads/writes a
//! small set of metadata keys plus audit notes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use deferred_shipping_core::{OrderId, OrderStatus, ProductId};

/// Metadata keys written to orders.
///
/// Preserved verbatim for compatibility with orders written by the
/// predecessor system.
pub mod meta_keys {
    /// Shopper-selected provisional shipping method id.
    pub const PROVISIONAL_METHOD: &str = "_wc_deposits_ps_provisional_shipping_method";
    /// Estimated shipping cost at selection time (decimal string).
    pub const PROVISIONAL_COST: &str = "_wc_deposits_ps_provisional_shipping_cost";
    /// Whether the shopper accepted the provisional shipping terms ("yes"/"no").
    pub const TERMS_ACCEPTED: &str = "_wc_deposits_ps_shipping_terms_accepted";
}

/// A shipping destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub state: String,
    pub postcode: String,
    pub city: String,
    pub address_1: String,
    pub address_2: String,
}

/// A purchased line on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Set when the line was paid via deposit (plain or installment plan).
    #[serde(default)]
    pub is_deposit: bool,
    /// Installment plan identifier; empty/absent for plain deposits.
    #[serde(default)]
    pub payment_plan: Option<String>,
}

/// A timestamped entry in the order's activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNote {
    pub created_at: DateTime<Utc>,
    pub content: String,
}

/// An order with the fields this service touches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    pub shipping_address: Address,
    pub items: Vec<LineItem>,
    /// Parent order, set on scheduled payment-plan installments.
    #[serde(default)]
    pub parent: Option<OrderId>,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
    #[serde(default)]
    pub notes: Vec<OrderNote>,
}

impl Order {
    /// Create a pending order with no metadata or notes.
    #[must_use]
    pub fn new(id: OrderId, shipping_address: Address, items: Vec<LineItem>) -> Self {
        Self {
            id,
            status: OrderStatus::Pending,
            shipping_address,
            items,
            parent: None,
            meta: BTreeMap::new(),
            notes: Vec::new(),
        }
    }

    /// Read a metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Write a metadata value, replacing any existing one.
    pub fn update_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    /// Append a human-readable note to the activity log.
    pub fn add_note(&mut self, content: impl Into<String>) {
        self.notes.push(OrderNote {
            created_at: Utc::now(),
            content: content.into(),
        });
    }

    /// Whether shipping collection is deferred for this order.
    ///
    /// True when any line carries the deposit flag; the payment-plan id is
    /// irrelevant here, both plain deposits and installment plans defer
    /// shipping.
    #[must_use]
    pub fn has_deferred_items(&self) -> bool {
        self.items.iter().any(|item| item.is_deposit)
    }

    /// Whether the order contains plain deposits and no installment plans.
    #[must_use]
    pub fn has_plain_deposits_only(&self) -> bool {
        let mut has_plain = false;
        for item in &self.items {
            if !item.is_deposit {
                continue;
            }
            if item.payment_plan.as_deref().is_some_and(|p| !p.is_empty()) {
                return false;
            }
            has_plain = true;
        }
        has_plain
    }
}

/// Whether the order's deposit or payment plan has been fully settled.
///
/// Plain deposits are settled once the order itself reaches a paid status.
/// Installment plans are settled when every scheduled child payment order
/// has reached a paid status.
#[must_use]
pub fn is_deposit_complete(order: &Order, children: &[Order]) -> bool {
    if !order.has_deferred_items() {
        return false;
    }

    if order.has_plain_deposits_only() {
        return order.status.is_paid();
    }

    children.iter().all(|child| child.status.is_paid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit_item(plan: Option<&str>) -> LineItem {
        LineItem {
            product_id: ProductId::new(1),
            quantity: 1,
            is_deposit: true,
            payment_plan: plan.map(str::to_string),
        }
    }

    fn plain_item() -> LineItem {
        LineItem {
            product_id: ProductId::new(2),
            quantity: 1,
            is_deposit: false,
            payment_plan: None,
        }
    }

    fn order_with(items: Vec<LineItem>) -> Order {
        Order::new(OrderId::new(10), Address::default(), items)
    }

    #[test]
    fn test_deferred_predicate_ignores_payment_plan() {
        assert!(order_with(vec![deposit_item(None)]).has_deferred_items());
        assert!(order_with(vec![deposit_item(Some("monthly"))]).has_deferred_items());
        assert!(!order_with(vec![plain_item()]).has_deferred_items());
        assert!(order_with(vec![plain_item(), deposit_item(None)]).has_deferred_items());
    }

    #[test]
    fn test_plain_deposits_only() {
        assert!(order_with(vec![deposit_item(None)]).has_plain_deposits_only());
        assert!(order_with(vec![deposit_item(Some(""))]).has_plain_deposits_only());
        assert!(!order_with(vec![deposit_item(Some("monthly"))]).has_plain_deposits_only());
        assert!(!order_with(vec![plain_item()]).has_plain_deposits_only());
        assert!(
            !order_with(vec![deposit_item(None), deposit_item(Some("monthly"))])
                .has_plain_deposits_only()
        );
    }

    #[test]
    fn test_plain_deposit_complete_follows_order_status() {
        let mut order = order_with(vec![deposit_item(None)]);
        assert!(!is_deposit_complete(&order, &[]));

        order.status = OrderStatus::Processing;
        assert!(is_deposit_complete(&order, &[]));

        order.status = OrderStatus::Completed;
        assert!(is_deposit_complete(&order, &[]));
    }

    #[test]
    fn test_payment_plan_complete_requires_all_children_paid() {
        let order = order_with(vec![deposit_item(Some("monthly"))]);

        let mut paid = order_with(vec![]);
        paid.status = OrderStatus::Completed;
        let pending = order_with(vec![]);

        assert!(is_deposit_complete(&order, &[paid.clone()]));
        assert!(!is_deposit_complete(
            &order,
            &[paid, pending]
        ));
    }

    #[test]
    fn test_meta_roundtrip() {
        let mut order = order_with(vec![deposit_item(None)]);
        order.update_meta(meta_keys::PROVISIONAL_METHOD, "flat_rate:3");
        order.update_meta(meta_keys::PROVISIONAL_COST, "12.50");
        order.update_meta(meta_keys::TERMS_ACCEPTED, "yes");

        assert_eq!(order.meta(meta_keys::PROVISIONAL_METHOD), Some("flat_rate:3"));
        assert_eq!(order.meta(meta_keys::PROVISIONAL_COST), Some("12.50"));
        assert_eq!(order.meta(meta_keys::TERMS_ACCEPTED), Some("yes"));
        assert_eq!(order.meta("_unknown_key"), None);
    }
}
