//! Application services.

pub mod nonce;
pub mod provisional;

pub use nonce::NonceService;
pub use provisional::{ProvisionalSelection, SelectionInput, ValidationError};
