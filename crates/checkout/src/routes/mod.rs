//! HTTP route handlers for the checkout service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Checkout
//! GET  /checkout/shipping-methods  - Provisional method listing + nonce
//! POST /checkout                   - Checkout submission (validates and
//!                                    records the provisional selection)
//!
//! # Cart
//! POST /cart/totals                - Evaluate cart totals through the
//!                                    pipeline (suppresses shipping for
//!                                    deferred carts)
//!
//! # Shipping API
//! POST /api/shipping/final-cost    - Final cost estimate for an order
//!                                    (requires a nonce)
//! ```

pub mod api;
pub mod cart;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .route("/shipping-methods", get(checkout::shipping_methods))
}

/// Create all routes for the checkout service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/checkout", checkout_routes())
        .route("/cart/totals", post(cart::totals))
        .route("/api/shipping/final-cost", post(api::final_cost))
}
