//! Deferred Shipping Core - Shared types library.
//!
//! This crate provides common types used by the deferred shipping
//! components:
//! - `checkout` - Checkout service that defers shipping collection for
//!   deposit and payment-plan orders
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP. This keeps it
//! lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money amounts, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
