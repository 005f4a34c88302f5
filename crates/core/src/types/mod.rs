//! Core types for the deferred shipping service.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use money::{Money, MoneyError};
pub use status::OrderStatus;
