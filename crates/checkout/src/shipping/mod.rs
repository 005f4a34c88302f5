//! Shipping estimation pipeline.
//!
//! Final shipping cost for a deferred order is a best-effort estimate
//! computed in four steps:
//!
//! 1. [`package`] - reduce the order's line items to one package summary
//! 2. [`zones`] - read candidate methods for the destination address
//! 3. [`cost_rules`] - price each candidate against the package
//! 4. [`calculator`] - pick the cheapest candidate
//!
//! Configuration absence at any step degrades to a zero cost, never an
//! error.

pub mod calculator;
pub mod cost_rules;
pub mod package;
pub mod zones;

pub use calculator::{CandidateMethod, calculate_final_shipping_cost, select_best};
pub use cost_rules::{CostTable, cost_for_method};
pub use package::Package;
pub use zones::{
    CatalogError, DEFAULT_ZONE_LABEL, ShippingMethod, ShippingZone, ZoneCatalog, ZoneLocation,
};
