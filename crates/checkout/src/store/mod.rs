//! Order repository.
//!
//! Order persistence belongs to the host platform; this in-memory
//! repository stands in for it behind the same narrow contract the
//! service needs: fetch by id, mutate-and-save, list child payment
//! orders.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use deferred_shipping_core::OrderId;

use crate::models::Order;

/// Error from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    NotFound(OrderId),
}

/// Shared in-memory order repository.
///
/// Cheaply cloneable; all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct OrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl OrderRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an order.
    pub async fn save(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    /// Fetch an order by id.
    pub async fn get(&self, id: OrderId) -> Option<Order> {
        self.orders.read().await.get(&id).cloned()
    }

    /// Fetch an order, failing when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids.
    pub async fn get_required(&self, id: OrderId) -> Result<Order, RepositoryError> {
        self.get(id).await.ok_or(RepositoryError::NotFound(id))
    }

    /// Apply a mutation to a stored order and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for unknown ids; the mutation
    /// does not run in that case.
    pub async fn update<F>(&self, id: OrderId, mutate: F) -> Result<Order, RepositoryError>
    where
        F: FnOnce(&mut Order),
    {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
        mutate(order);
        Ok(order.clone())
    }

    /// Scheduled child payment orders of a payment-plan order.
    pub async fn children_of(&self, parent: OrderId) -> Vec<Order> {
        let mut children: Vec<Order> = self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.parent == Some(parent))
            .cloned()
            .collect();
        children.sort_by_key(|order| order.id);
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::Address;

    fn order(id: i64) -> Order {
        Order::new(OrderId::new(id), Address::default(), vec![])
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let repo = OrderRepository::new();
        repo.save(order(1)).await;

        assert!(repo.get(OrderId::new(1)).await.is_some());
        assert!(repo.get(OrderId::new(2)).await.is_none());
        assert!(matches!(
            repo.get_required(OrderId::new(2)).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_persists_mutation() {
        let repo = OrderRepository::new();
        repo.save(order(1)).await;

        let updated = repo
            .update(OrderId::new(1), |o| o.update_meta("_key", "value"))
            .await
            .expect("order exists");
        assert_eq!(updated.meta("_key"), Some("value"));

        let reread = repo.get(OrderId::new(1)).await.expect("order exists");
        assert_eq!(reread.meta("_key"), Some("value"));
    }

    #[tokio::test]
    async fn test_children_of() {
        let repo = OrderRepository::new();
        let mut parent = order(1);
        parent.id = OrderId::new(1);
        repo.save(parent).await;

        let mut child_b = order(3);
        child_b.parent = Some(OrderId::new(1));
        let mut child_a = order(2);
        child_a.parent = Some(OrderId::new(1));
        let unrelated = order(4);

        repo.save(child_b).await;
        repo.save(child_a).await;
        repo.save(unrelated).await;

        let children = repo.children_of(OrderId::new(1)).await;
        let ids: Vec<i64> = children.iter().map(|o| o.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
