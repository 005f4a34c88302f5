//! Cart totals route handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::models::Cart;
use crate::state::AppState;
use crate::totals::CartTotals;

/// Evaluate a cart through the totals pipeline.
///
/// The host checkout posts the cart here during total calculation; for
/// carts with deposit or payment-plan lines the response carries zeroed
/// shipping so the host does not charge shipping now.
#[instrument(skip(state, cart), fields(lines = cart.lines.len()))]
pub async fn totals(
    State(state): State<AppState>,
    Json(cart): Json<Cart>,
) -> Json<CartTotals> {
    Json(state.totals().run(&cart))
}
