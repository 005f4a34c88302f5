//! Carts at checkout time.
//!
//! The cart itself is owned by the host checkout flow; this service only
//! needs the line flags to decide whether shipping collection is deferred.

use serde::{Deserialize, Serialize};

use deferred_shipping_core::ProductId;

/// A line in the shopper's cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Set when the line is purchased via deposit (plain or installment plan).
    #[serde(default)]
    pub is_deposit: bool,
    /// Installment plan identifier; empty/absent for plain deposits.
    #[serde(default)]
    pub payment_plan: Option<String>,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Whether shipping collection is deferred for this cart.
    ///
    /// True when any line carries the deposit flag. The payment-plan id is
    /// irrelevant, both plain deposits and installment plans defer shipping.
    #[must_use]
    pub fn has_deferred_items(&self) -> bool {
        self.lines.iter().any(|line| line.is_deposit)
    }

    /// Whether the cart holds anything at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deferred_predicate() {
        let mut cart = Cart::default();
        assert!(!cart.has_deferred_items());

        cart.lines.push(CartLine {
            product_id: ProductId::new(1),
            quantity: 2,
            is_deposit: false,
            payment_plan: None,
        });
        assert!(!cart.has_deferred_items());

        cart.lines.push(CartLine {
            product_id: ProductId::new(2),
            quantity: 1,
            is_deposit: true,
            payment_plan: Some("quarterly".to_string()),
        });
        assert!(cart.has_deferred_items());
    }
}
