//! Package summaries derived from order contents.

use rust_decimal::Decimal;

use deferred_shipping_core::ProductId;

use crate::models::{Order, ProductCatalog};

/// An aggregate physical descriptor of an order's contents.
///
/// Weight sums unit weight times quantity. Dimensions take the per-axis
/// maximum across items rather than true bin-packing, a deliberate
/// simplification. Built fresh per calculation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub weight: Decimal,
    pub length: Decimal,
    pub width: Decimal,
    pub height: Decimal,
    /// Number of lines with a resolvable product, not summed quantities.
    pub item_count: u32,
}

impl Package {
    /// Summarize `(product id, quantity)` pairs into one package.
    ///
    /// Lines whose product cannot be resolved are skipped and not counted.
    /// Missing weights and dimensions contribute zero, so an item without
    /// dimensions never shrinks the running maximum.
    #[must_use]
    pub fn from_items<I>(items: I, products: &ProductCatalog) -> Self
    where
        I: IntoIterator<Item = (ProductId, u32)>,
    {
        let mut package = Self::default();

        for (product_id, quantity) in items {
            let Some(product) = products.get(product_id) else {
                continue;
            };

            let weight = product.weight.unwrap_or(Decimal::ZERO);
            package.weight += weight * Decimal::from(quantity);

            package.length = package.length.max(product.length.unwrap_or(Decimal::ZERO));
            package.width = package.width.max(product.width.unwrap_or(Decimal::ZERO));
            package.height = package.height.max(product.height.unwrap_or(Decimal::ZERO));

            package.item_count += 1;
        }

        package
    }

    /// Summarize an order's line items.
    #[must_use]
    pub fn from_order(order: &Order, products: &ProductCatalog) -> Self {
        Self::from_items(
            order.items.iter().map(|item| (item.product_id, item.quantity)),
            products,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::models::Product;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal")
    }

    fn product(id: i64, weight: &str, dims: Option<(&str, &str, &str)>) -> Product {
        Product {
            id: ProductId::new(id),
            weight: Some(dec(weight)),
            length: dims.map(|(l, _, _)| dec(l)),
            width: dims.map(|(_, w, _)| dec(w)),
            height: dims.map(|(_, _, h)| dec(h)),
        }
    }

    fn catalog() -> ProductCatalog {
        ProductCatalog::new(vec![
            product(1, "0.5", Some(("10", "4", "2"))),
            product(2, "2", Some(("3", "8", "1"))),
            product(3, "1", None),
        ])
    }

    #[test]
    fn test_weight_sums_and_dimensions_take_max() {
        let items = vec![(ProductId::new(1), 2u32), (ProductId::new(2), 1u32)];
        let package = Package::from_items(items, &catalog());

        // 0.5 * 2 + 2 * 1
        assert_eq!(package.weight, dec("3"));
        assert_eq!(package.length, dec("10"));
        assert_eq!(package.width, dec("8"));
        assert_eq!(package.height, dec("2"));
        assert_eq!(package.item_count, 2);
    }

    #[test]
    fn test_weight_invariant_to_item_order() {
        let forward = vec![(ProductId::new(1), 2u32), (ProductId::new(2), 1u32)];
        let reverse = vec![(ProductId::new(2), 1u32), (ProductId::new(1), 2u32)];

        let a = Package::from_items(forward, &catalog());
        let b = Package::from_items(reverse, &catalog());
        assert_eq!(a, b);
    }

    #[test]
    fn test_dimensionless_item_never_shrinks_max() {
        let with_dims = Package::from_items(vec![(ProductId::new(1), 1u32)], &catalog());
        let with_extra = Package::from_items(
            vec![(ProductId::new(1), 1u32), (ProductId::new(3), 1u32)],
            &catalog(),
        );

        assert_eq!(with_extra.length, with_dims.length);
        assert_eq!(with_extra.width, with_dims.width);
        assert_eq!(with_extra.height, with_dims.height);
        assert_eq!(with_extra.item_count, 2);
    }

    #[test]
    fn test_unresolvable_products_skipped_without_error() {
        let items = vec![(ProductId::new(99), 5u32), (ProductId::new(3), 1u32)];
        let package = Package::from_items(items, &catalog());

        assert_eq!(package.item_count, 1);
        assert_eq!(package.weight, dec("1"));
    }

    #[test]
    fn test_empty_order_yields_empty_package() {
        let package = Package::from_items(Vec::new(), &catalog());
        assert_eq!(package, Package::default());
    }
}
