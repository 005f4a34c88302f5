//! Domain models for the checkout service.

pub mod cart;
pub mod order;
pub mod product;

pub use cart::{Cart, CartLine};
pub use order::{Address, LineItem, Order, OrderNote, is_deposit_complete, meta_keys};
pub use product::{Product, ProductCatalog};
