//! Deferred Shipping Checkout library.
//!
//! This crate provides the checkout service functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shipping;
pub mod state;
pub mod store;
pub mod totals;
